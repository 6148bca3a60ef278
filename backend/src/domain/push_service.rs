//! Push subscription registry.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    HotelRepository, HotelRepositoryError, SubscriptionRepository, SubscriptionRepositoryError,
};
use crate::domain::{Error, HotelId, PushSubscription, WebPushSubscription};

fn map_hotel_error(error: HotelRepositoryError) -> Error {
    match error {
        HotelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hotel repository unavailable: {message}"))
        }
        _ => Error::internal(format!("hotel repository error: {error}")),
    }
}

fn map_subscription_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
    }
}

/// Subscribe/unsubscribe operations over the subscription store.
pub struct PushRegistry {
    hotels: Arc<dyn HotelRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl PushRegistry {
    /// Build the registry over its collaborator ports.
    pub fn new(
        hotels: Arc<dyn HotelRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            hotels,
            subscriptions,
        }
    }

    /// Register a subscription for a hotel's menu updates.
    ///
    /// Idempotent: subscribing again with the same `(hotel, endpoint)` pair
    /// replaces the stored keys rather than adding a second row. The hotel
    /// must exist.
    pub async fn subscribe(
        &self,
        hotel_id: HotelId,
        subscription: WebPushSubscription,
    ) -> Result<PushSubscription, Error> {
        self.hotels
            .find_by_id(&hotel_id)
            .await
            .map_err(map_hotel_error)?
            .ok_or_else(|| Error::not_found("Hotel not found"))?;

        self.subscriptions
            .upsert(&PushSubscription {
                id: Uuid::new_v4(),
                hotel_id,
                subscription,
                created_at: Utc::now(),
            })
            .await
            .map_err(map_subscription_error)
    }

    /// Remove the subscription for a `(hotel, endpoint)` pair.
    ///
    /// Deleting an unknown pair succeeds; there is nothing useful to report.
    pub async fn unsubscribe(&self, hotel_id: HotelId, endpoint: &str) -> Result<(), Error> {
        self.subscriptions
            .delete_by_endpoint(&hotel_id, endpoint)
            .await
            .map_err(map_subscription_error)
    }
}

//! Port abstraction for push subscription persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{HotelId, PushSubscription};

/// Persistence errors raised by subscription repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    /// Repository connection could not be established.
    #[error("subscription repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("subscription repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl SubscriptionRepositoryError {
    /// Build a [`Self::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`Self::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Push subscription store keyed by `(hotel_id, endpoint)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or replace the subscription for its `(hotel_id, endpoint)`
    /// pair, returning the stored row.
    async fn upsert(
        &self,
        subscription: &PushSubscription,
    ) -> Result<PushSubscription, SubscriptionRepositoryError>;

    /// Delete by `(hotel_id, endpoint)`; missing rows are not an error.
    async fn delete_by_endpoint(
        &self,
        hotel_id: &HotelId,
        endpoint: &str,
    ) -> Result<(), SubscriptionRepositoryError>;

    /// Delete one subscription by identifier (dead-endpoint pruning).
    async fn delete_by_id(&self, id: &Uuid) -> Result<(), SubscriptionRepositoryError>;

    /// Every subscription registered for a hotel.
    async fn list_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Vec<PushSubscription>, SubscriptionRepositoryError>;
}

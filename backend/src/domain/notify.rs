//! Menu-updated notification fan-out.
//!
//! The fan-out is fire-and-forget from the upload handler's perspective: it
//! runs on a detached task, isolates every per-subscriber failure, and only
//! reports back through logs. Endpoints the push service declares gone are
//! pruned; transient failures keep their subscription for the next trigger.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    HotelRepository, PushDeliveryError, PushTransport, SubscriptionRepository,
};
use crate::domain::{HotelId, NotificationPayload, PushSubscription};

/// Per-subscriber delivery outcome.
enum Delivery {
    Delivered,
    Pruned,
    Failed,
}

/// Tally of one fan-out run, used for logging and tests only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutSummary {
    /// Deliveries accepted by the push service.
    pub delivered: usize,
    /// Subscriptions deleted after a gone signal.
    pub pruned: usize,
    /// Transient failures left for the next trigger.
    pub failed: usize,
}

/// Delivers menu-updated notifications to every subscriber of a hotel.
pub struct MenuNotifier {
    hotels: Arc<dyn HotelRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    transport: Arc<dyn PushTransport>,
}

impl MenuNotifier {
    /// Build a notifier over its collaborator ports.
    pub fn new(
        hotels: Arc<dyn HotelRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        transport: Arc<dyn PushTransport>,
    ) -> Self {
        Self {
            hotels,
            subscriptions,
            transport,
        }
    }

    /// Notify every subscriber of `hotel_id` that today's menu changed.
    ///
    /// Never returns an error: a missing hotel aborts silently and every
    /// delivery failure is handled per subscriber. All sends are issued
    /// concurrently and the call returns once each has settled.
    pub async fn notify_menu_updated(&self, hotel_id: HotelId) -> FanoutSummary {
        let hotel_name = match self.hotels.find_by_id(&hotel_id).await {
            Ok(Some(hotel)) => hotel.hotel_name,
            Ok(None) => {
                debug!(%hotel_id, "fan-out skipped: hotel not found");
                return FanoutSummary::default();
            }
            Err(error) => {
                warn!(%hotel_id, %error, "fan-out skipped: hotel lookup failed");
                return FanoutSummary::default();
            }
        };

        let subscribers = match self.subscriptions.list_for_hotel(&hotel_id).await {
            Ok(subscribers) => subscribers,
            Err(error) => {
                warn!(%hotel_id, %error, "fan-out skipped: subscription listing failed");
                return FanoutSummary::default();
            }
        };
        if subscribers.is_empty() {
            debug!(%hotel_id, "fan-out skipped: no subscribers");
            return FanoutSummary::default();
        }

        let payload = NotificationPayload::menu_updated(&hotel_name);
        let deliveries = subscribers
            .into_iter()
            .map(|subscriber| self.deliver_one(subscriber, payload.clone()));
        let outcomes = join_all(deliveries).await;

        let mut summary = FanoutSummary::default();
        for outcome in outcomes {
            match outcome {
                Delivery::Delivered => summary.delivered += 1,
                Delivery::Pruned => summary.pruned += 1,
                Delivery::Failed => summary.failed += 1,
            }
        }
        info!(
            %hotel_id,
            delivered = summary.delivered,
            pruned = summary.pruned,
            failed = summary.failed,
            "menu fan-out settled"
        );
        summary
    }

    async fn deliver_one(
        &self,
        subscriber: PushSubscription,
        payload: NotificationPayload,
    ) -> Delivery {
        match self
            .transport
            .deliver(&subscriber.subscription, &payload)
            .await
        {
            Ok(()) => Delivery::Delivered,
            Err(PushDeliveryError::Gone) => {
                info!(
                    subscription_id = %subscriber.id,
                    hotel_id = %subscriber.hotel_id,
                    "pruning subscription: endpoint gone"
                );
                if let Err(error) = self.subscriptions.delete_by_id(&subscriber.id).await {
                    warn!(subscription_id = %subscriber.id, %error, "failed to prune subscription");
                }
                Delivery::Pruned
            }
            Err(error) => {
                warn!(
                    subscription_id = %subscriber.id,
                    hotel_id = %subscriber.hotel_id,
                    %error,
                    "push delivery failed; keeping subscription"
                );
                Delivery::Failed
            }
        }
    }
}

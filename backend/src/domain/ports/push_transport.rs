//! Port abstraction for web-push delivery.

use async_trait::async_trait;

use crate::domain::{NotificationPayload, WebPushSubscription};

/// Delivery failures reported by push transport adapters.
///
/// [`Self::Gone`] is the signal that drives subscription pruning; every
/// other failure leaves the subscription in place for the next fan-out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushDeliveryError {
    /// The push service reported the endpoint as permanently gone.
    #[error("subscription endpoint is gone")]
    Gone,
    /// Any other delivery failure, assumed transient.
    #[error("push delivery failed: {message}")]
    Delivery {
        /// Adapter-supplied description.
        message: String,
    },
}

impl PushDeliveryError {
    /// Build a [`Self::Delivery`] error.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Web-push delivery capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Deliver one payload to one subscription endpoint.
    async fn deliver(
        &self,
        subscription: &WebPushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushDeliveryError>;
}

//! Port abstraction for outbound SMS delivery.

use async_trait::async_trait;

use crate::domain::MobileNumber;

/// Failures reported by SMS relay adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sms relay failed: {message}")]
pub struct SmsRelayError {
    /// Adapter-supplied description.
    pub message: String,
}

impl SmsRelayError {
    /// Build a relay error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Text-message delivery capability.
///
/// Delivery is best-effort: the OTP flow logs relay failures and still
/// reports success to the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsRelay: Send + Sync {
    /// Send one message to one number.
    async fn send(&self, to: &MobileNumber, message: &str) -> Result<(), SmsRelayError>;
}

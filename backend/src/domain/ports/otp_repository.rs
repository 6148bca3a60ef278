//! Port abstraction for one-time code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{MobileNumber, OneTimeCode, OtpCode};

/// Persistence errors raised by one-time code adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OtpRepositoryError {
    /// Repository connection could not be established.
    #[error("one-time code repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("one-time code repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl OtpRepositoryError {
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

/// One-time code store with one active code per mobile number.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Store a code, replacing any earlier code for the same number.
    async fn upsert(&self, code: &OneTimeCode) -> Result<(), OtpRepositoryError>;

    /// Atomically consume a matching, unexpired code.
    ///
    /// Returns `true` when a code issued at or after `issued_after` matched
    /// and was deleted; the deletion is what makes codes single-use.
    async fn consume(
        &self,
        mobile_number: &MobileNumber,
        code: &OtpCode,
        issued_after: DateTime<Utc>,
    ) -> Result<bool, OtpRepositoryError>;
}

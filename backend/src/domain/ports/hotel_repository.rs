//! Port abstraction for hotel account persistence.

use async_trait::async_trait;

use crate::domain::{Hotel, HotelId, MobileNumber};

/// Persistence errors raised by hotel repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotelRepositoryError {
    /// Repository connection could not be established.
    #[error("hotel repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("hotel repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
    /// Another writer registered the same mobile number first.
    #[error("hotel with this mobile number already exists")]
    DuplicateMobileNumber,
}

impl HotelRepositoryError {
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

/// Hotel account store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Insert a freshly registered account.
    async fn insert(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError>;

    /// Persist refreshed contact details for an existing account.
    async fn update_profile(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError>;

    /// Fetch an account by login identity.
    async fn find_by_mobile_number(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<Hotel>, HotelRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelRepositoryError>;
}

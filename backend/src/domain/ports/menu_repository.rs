//! Port abstraction for menu record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{HotelId, MenuId, MenuRecord};

/// Persistence errors raised by menu repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuRepositoryError {
    /// Repository connection could not be established.
    #[error("menu repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("menu repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl MenuRepositoryError {
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

/// A menu record joined with its hotel's display fields for public listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuWithHotel {
    /// The menu record itself.
    pub record: MenuRecord,
    /// Hotel display name; may be empty when never provided.
    pub hotel_name: String,
    /// Contact person name.
    pub contact_name: String,
}

/// Offset/limit window passed down from the HTTP pagination envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Rows to skip.
    pub offset: i64,
    /// Maximum rows to return.
    pub limit: i64,
}

/// Menu record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Most recent record for a hotel by descending date, if any.
    async fn latest_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Option<MenuRecord>, MenuRepositoryError>;

    /// Insert a new record.
    async fn insert(&self, record: &MenuRecord) -> Result<(), MenuRepositoryError>;

    /// Replace the image and note of an existing record in place.
    async fn update_content(
        &self,
        id: &MenuId,
        image_url: &str,
        note: &str,
    ) -> Result<(), MenuRepositoryError>;

    /// A hotel's own records, newest first.
    async fn history_for_hotel(
        &self,
        hotel_id: &HotelId,
        window: PageWindow,
    ) -> Result<Vec<MenuRecord>, MenuRepositoryError>;

    /// All hotels' records inside `[start, end)`, newest first, with hotel
    /// display fields joined in.
    async fn dated_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: PageWindow,
    ) -> Result<Vec<MenuWithHotel>, MenuRepositoryError>;

    /// The most recent record of every hotel, newest first.
    async fn latest_per_hotel(
        &self,
        window: PageWindow,
    ) -> Result<Vec<MenuWithHotel>, MenuRepositoryError>;
}

//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. They exist solely to satisfy Diesel's type requirements.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{hotels, menu_records, one_time_codes, push_subscriptions};

/// Row struct for reading from the hotels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hotels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HotelRow {
    pub id: Uuid,
    pub mobile_number: String,
    pub name: String,
    pub hotel_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for registering hotels.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hotels)]
pub(crate) struct NewHotelRow<'a> {
    pub id: Uuid,
    pub mobile_number: &'a str,
    pub name: &'a str,
    pub hotel_name: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for refreshing hotel profile fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = hotels)]
pub(crate) struct HotelProfileUpdate<'a> {
    pub name: &'a str,
    pub hotel_name: &'a str,
}

// ---------------------------------------------------------------------------
// One-time code models
// ---------------------------------------------------------------------------

/// Insertable/upsert struct for one-time codes.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = one_time_codes)]
pub(crate) struct OneTimeCodeRow<'a> {
    pub mobile_number: &'a str,
    pub code: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Menu record models
// ---------------------------------------------------------------------------

/// Row struct for reading from the menu_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuRecordRow {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub image_url: String,
    pub note: String,
    pub date: DateTime<Utc>,
}

/// Insertable struct for new menu records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = menu_records)]
pub(crate) struct NewMenuRecordRow<'a> {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub image_url: &'a str,
    pub note: &'a str,
    pub date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Push subscription models
// ---------------------------------------------------------------------------

/// Row struct for reading from the push_subscriptions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = push_subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PushSubscriptionRow {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub endpoint: String,
    pub expiration_time: Option<DateTime<Utc>>,
    pub p256dh: String,
    pub auth: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new subscriptions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = push_subscriptions)]
pub(crate) struct NewPushSubscriptionRow<'a> {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub endpoint: &'a str,
    pub expiration_time: Option<DateTime<Utc>>,
    pub p256dh: &'a str,
    pub auth: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset applied when a `(hotel_id, endpoint)` pair re-subscribes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = push_subscriptions)]
pub(crate) struct PushSubscriptionUpdate<'a> {
    pub expiration_time: Option<Option<DateTime<Utc>>>,
    pub p256dh: &'a str,
    pub auth: &'a str,
}

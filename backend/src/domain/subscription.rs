//! Web-push subscription records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::HotelId;

/// Client keys accompanying a browser push subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionKeys {
    /// Client public key for payload encryption.
    pub p256dh: String,
    /// Shared authentication secret.
    pub auth: String,
}

/// The push subscription as handed over by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebPushSubscription {
    /// Push-service URL messages are delivered to.
    pub endpoint: String,
    /// Optional expiry supplied by the push service, in epoch milliseconds.
    #[serde(default)]
    pub expiration_time: Option<i64>,
    /// Encryption keys.
    pub keys: SubscriptionKeys,
}

/// A stored subscription owned by a hotel.
///
/// ## Invariants
/// - `(hotel_id, subscription.endpoint)` is unique; subscribing again with
///   the same pair replaces the stored keys rather than adding a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    /// Stable identifier.
    pub id: Uuid,
    /// Hotel whose menu updates this subscriber follows.
    pub hotel_id: HotelId,
    /// Browser subscription payload.
    pub subscription: WebPushSubscription,
    /// First-subscribed timestamp.
    pub created_at: DateTime<Utc>,
}

/// Notification payload delivered to every subscriber of a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Notification title.
    pub title: String,
    /// Body line referencing the hotel display name when known.
    pub body: String,
    /// In-app path the notification should open.
    pub path: String,
}

impl NotificationPayload {
    /// Build the menu-updated payload for a hotel display name.
    ///
    /// Falls back to a generic phrase when the hotel has not set a name.
    pub fn menu_updated(hotel_name: &str) -> Self {
        let body = if hotel_name.trim().is_empty() {
            "Today's menu has been updated".to_owned()
        } else {
            format!("Today's menu from {hotel_name} is out")
        };
        Self {
            title: "Menu Updated".to_owned(),
            body,
            path: "/".to_owned(),
        }
    }
}

//! Push subscription HTTP handlers.
//!
//! ```text
//! GET  /api/push/vapidPublicKey
//! POST /api/push/subscribe   {"hotelId": "...", "subscription": {...}}
//! POST /api/push/unsubscribe {"hotelId": "...", "endpoint": "..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, HotelId, PushSubscription, WebPushSubscription};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response body for `GET /api/push/vapidPublicKey`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VapidKeyResponse {
    /// Public VAPID key clients subscribe with.
    pub public_key: String,
}

/// Request body for `POST /api/push/subscribe`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    /// Hotel whose menu updates to follow.
    pub hotel_id: Option<String>,
    /// Browser push subscription payload.
    pub subscription: Option<WebPushSubscription>,
}

/// A stored subscription as serialised to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    /// Stable identifier.
    pub id: String,
    /// Hotel the subscription belongs to.
    pub hotel_id: String,
    /// Browser subscription payload.
    pub subscription: WebPushSubscription,
    /// First-subscribed timestamp, RFC 3339.
    pub created_at: String,
}

impl From<PushSubscription> for SubscriptionDto {
    fn from(stored: PushSubscription) -> Self {
        Self {
            id: stored.id.to_string(),
            hotel_id: stored.hotel_id.to_string(),
            subscription: stored.subscription,
            created_at: stored.created_at.to_rfc3339(),
        }
    }
}

/// Response body for `POST /api/push/subscribe`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscribeResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The stored (possibly replaced) subscription.
    pub subscription: SubscriptionDto,
}

/// Request body for `POST /api/push/unsubscribe`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    /// Hotel the subscription belongs to.
    pub hotel_id: Option<String>,
    /// Endpoint to remove.
    pub endpoint: Option<String>,
}

/// Response body for `POST /api/push/unsubscribe`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnsubscribeResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

fn parse_hotel_id(raw: &str) -> Result<HotelId, Error> {
    Uuid::parse_str(raw)
        .map(HotelId::from_uuid)
        .map_err(|_| Error::invalid_request("hotelId must be a valid UUID"))
}

/// Serve the public VAPID key.
#[utoipa::path(
    get,
    path = "/api/push/vapidPublicKey",
    responses((status = 200, description = "Public key", body = VapidKeyResponse)),
    tags = ["push"],
    operation_id = "vapidPublicKey"
)]
#[get("/vapidPublicKey")]
pub async fn vapid_public_key(state: web::Data<HttpState>) -> web::Json<VapidKeyResponse> {
    web::Json(VapidKeyResponse {
        public_key: state.vapid_public_key.clone(),
    })
}

/// Register (or refresh) a subscription for a hotel's menu updates.
#[utoipa::path(
    post,
    path = "/api/push/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscribeResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Hotel not found", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["push"],
    operation_id = "subscribe"
)]
#[post("/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    payload: web::Json<SubscribeRequest>,
) -> ApiResult<HttpResponse> {
    let SubscribeRequest {
        hotel_id,
        subscription,
    } = payload.into_inner();
    let (Some(hotel_id), Some(subscription)) = (hotel_id, subscription) else {
        return Err(Error::invalid_request(
            "hotelId and subscription are required",
        ));
    };
    let hotel_id = parse_hotel_id(&hotel_id)?;

    let stored = state.registry.subscribe(hotel_id, subscription).await?;
    Ok(HttpResponse::Created().json(SubscribeResponse {
        success: true,
        message: "Subscribed successfully".to_owned(),
        subscription: SubscriptionDto::from(stored),
    }))
}

/// Remove a subscription by hotel and endpoint.
#[utoipa::path(
    post,
    path = "/api/push/unsubscribe",
    request_body = UnsubscribeRequest,
    responses(
        (status = 200, description = "Unsubscribed", body = UnsubscribeResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["push"],
    operation_id = "unsubscribe"
)]
#[post("/unsubscribe")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    payload: web::Json<UnsubscribeRequest>,
) -> ApiResult<web::Json<UnsubscribeResponse>> {
    let UnsubscribeRequest { hotel_id, endpoint } = payload.into_inner();
    let (Some(hotel_id), Some(endpoint)) = (hotel_id, endpoint) else {
        return Err(Error::invalid_request("hotelId and endpoint are required"));
    };
    let hotel_id = parse_hotel_id(&hotel_id)?;

    state.registry.unsubscribe(hotel_id, &endpoint).await?;
    Ok(web::Json(UnsubscribeResponse {
        success: true,
        message: "Unsubscribed successfully".to_owned(),
    }))
}

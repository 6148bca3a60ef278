//! Hotel dashboard HTTP handler.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::HotelRepositoryError;
use crate::domain::{Error, Hotel};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedHotel;
use crate::inbound::http::state::HttpState;

/// Hotel profile as returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelProfile {
    /// Stable identifier.
    pub id: String,
    /// Login identity.
    pub mobile_number: String,
    /// Contact person name.
    pub name: String,
    /// Display name shown to subscribers.
    pub hotel_name: String,
    /// Account role.
    pub role: String,
    /// Account creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<Hotel> for HotelProfile {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id.to_string(),
            mobile_number: hotel.mobile_number.to_string(),
            name: hotel.name,
            hotel_name: hotel.hotel_name,
            role: hotel.role.as_str().to_owned(),
            created_at: hotel.created_at.to_rfc3339(),
        }
    }
}

/// Response body for `GET /api/hotel/dashboard`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    /// Always `true`.
    pub success: bool,
    /// The caller's profile.
    pub hotel: HotelProfile,
}

fn map_hotel_error(error: HotelRepositoryError) -> Error {
    match error {
        HotelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hotel repository unavailable: {message}"))
        }
        _ => Error::internal(format!("hotel repository error: {error}")),
    }
}

/// Return the authenticated hotel's profile.
#[utoipa::path(
    get,
    path = "/api/hotel/dashboard",
    responses(
        (status = 200, description = "Profile", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ErrorBody),
        (status = 403, description = "Forbidden", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Hotel not found", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["hotel"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    caller: AuthenticatedHotel,
) -> ApiResult<web::Json<DashboardResponse>> {
    let hotel = state
        .hotels
        .find_by_id(&caller.hotel_id)
        .await
        .map_err(map_hotel_error)?
        .ok_or_else(|| Error::not_found("Hotel not found"))?;

    Ok(web::Json(DashboardResponse {
        success: true,
        hotel: HotelProfile::from(hotel),
    }))
}

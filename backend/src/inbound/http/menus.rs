//! Menu HTTP handlers.
//!
//! ```text
//! POST /api/menu/upload   (multipart: menuImage + optional note)
//! GET  /api/menu/history  (authenticated, paginated)
//! GET  /api/menu/today    (public, paginated)
//! GET  /api/menu/latest   (public, paginated)
//! ```

use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_web::{get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{MenuRepositoryError, MenuWithHotel, StorageKind};
use crate::domain::{Error, ImageUpload, MenuRecord, PublishAction, local_day_bounds};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedHotel;
use crate::inbound::http::pagination::{PageQuery, Paginated};
use crate::inbound::http::state::HttpState;

/// Multipart form for the upload endpoint.
#[derive(Debug, MultipartForm)]
pub struct MenuUploadForm {
    /// The menu photo; absence fails fast with a client error.
    #[multipart(rename = "menuImage", limit = "10MiB")]
    pub menu_image: Option<Bytes>,
    /// Optional free-text note.
    pub note: Option<Text<String>>,
}

/// A menu record as serialised to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuDto {
    /// Stable identifier.
    pub id: String,
    /// Owning hotel.
    pub hotel_id: String,
    /// Image URL (remote or inline `data:` URI).
    pub image_url: String,
    /// Free-text note.
    pub note: String,
    /// Publication timestamp, RFC 3339.
    pub date: String,
}

impl From<MenuRecord> for MenuDto {
    fn from(record: MenuRecord) -> Self {
        Self {
            id: record.id.to_string(),
            hotel_id: record.hotel_id.to_string(),
            image_url: record.image_url,
            note: record.note,
            date: record.date.to_rfc3339(),
        }
    }
}

/// A menu record joined with its hotel's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuWithHotelDto {
    /// Stable identifier.
    pub id: String,
    /// Owning hotel.
    pub hotel_id: String,
    /// Image URL.
    pub image_url: String,
    /// Free-text note.
    pub note: String,
    /// Publication timestamp, RFC 3339.
    pub date: String,
    /// Hotel display name.
    pub hotel_name: String,
    /// Contact person name.
    pub name: String,
}

impl From<MenuWithHotel> for MenuWithHotelDto {
    fn from(joined: MenuWithHotel) -> Self {
        Self {
            id: joined.record.id.to_string(),
            hotel_id: joined.record.hotel_id.to_string(),
            image_url: joined.record.image_url,
            note: joined.record.note,
            date: joined.record.date.to_rfc3339(),
            hotel_name: joined.hotel_name,
            name: joined.contact_name,
        }
    }
}

/// Response body for `POST /api/menu/upload`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Always `true`.
    pub success: bool,
    /// Distinguishes update vs. fresh upload and remote vs. inline storage.
    pub message: String,
    /// The record as persisted.
    pub menu: MenuDto,
}

fn map_menu_error(error: MenuRepositoryError) -> Error {
    match error {
        MenuRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("menu repository unavailable: {message}"))
        }
        MenuRepositoryError::Query { message } => {
            Error::internal(format!("menu repository error: {message}"))
        }
    }
}

fn upload_message(action: PublishAction, storage: StorageKind) -> &'static str {
    match (action, storage) {
        (PublishAction::Updated, StorageKind::Remote) => "Menu updated successfully",
        (PublishAction::Created, StorageKind::Remote) => "Menu uploaded successfully",
        (PublishAction::Updated, StorageKind::Inline) => "Menu updated locally (inline storage)",
        (PublishAction::Created, StorageKind::Inline) => "Menu uploaded locally (inline storage)",
    }
}

/// Publish today's menu photo for the authenticated hotel.
#[utoipa::path(
    post,
    path = "/api/menu/upload",
    responses(
        (status = 200, description = "Menu stored", body = UploadResponse),
        (status = 400, description = "No image provided", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ErrorBody),
        (status = 403, description = "Forbidden", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Image storage failed", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["menu"],
    operation_id = "uploadMenu"
)]
#[post("/upload")]
pub async fn upload(
    state: web::Data<HttpState>,
    caller: AuthenticatedHotel,
    MultipartForm(form): MultipartForm<MenuUploadForm>,
) -> ApiResult<web::Json<UploadResponse>> {
    let Some(image) = form.menu_image else {
        return Err(Error::invalid_request("No image provided"));
    };
    let content_type = image
        .content_type
        .as_ref()
        .map_or_else(|| "application/octet-stream".to_owned(), ToString::to_string);
    let note = form.note.map(Text::into_inner).unwrap_or_default();

    let outcome = state
        .publisher
        .publish(
            caller.hotel_id,
            ImageUpload {
                bytes: image.data.to_vec(),
                content_type,
            },
            note,
        )
        .await?;

    Ok(web::Json(UploadResponse {
        success: true,
        message: upload_message(outcome.action, outcome.storage).to_owned(),
        menu: MenuDto::from(outcome.record),
    }))
}

/// The authenticated hotel's own records, newest first.
#[utoipa::path(
    get,
    path = "/api/menu/history",
    params(PageQuery),
    responses(
        (status = 200, description = "Menu history", body = Paginated<MenuDto>),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["menu"],
    operation_id = "menuHistory"
)]
#[get("/history")]
pub async fn history(
    state: web::Data<HttpState>,
    caller: AuthenticatedHotel,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<MenuDto>>> {
    let query = query.into_inner();
    let records = state
        .menus
        .history_for_hotel(&caller.hotel_id, query.window())
        .await
        .map_err(map_menu_error)?;

    let rows = records.into_iter().map(MenuDto::from).collect();
    Ok(web::Json(Paginated::from_overfetch(rows, query)))
}

/// Every hotel's record for the current local day.
#[utoipa::path(
    get,
    path = "/api/menu/today",
    params(PageQuery),
    responses(
        (status = 200, description = "Today's menus", body = Paginated<MenuWithHotelDto>)
    ),
    tags = ["menu"],
    operation_id = "menusToday"
)]
#[get("/today")]
pub async fn today(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<MenuWithHotelDto>>> {
    let (start, end) = local_day_bounds(Utc::now())
        .ok_or_else(|| Error::internal("local midnight is undefined today"))?;

    let query = query.into_inner();
    let records = state
        .menus
        .dated_between(start, end, query.window())
        .await
        .map_err(map_menu_error)?;

    let rows = records.into_iter().map(MenuWithHotelDto::from).collect();
    Ok(web::Json(Paginated::from_overfetch(rows, query)))
}

/// The most recent record of every hotel, newest first.
#[utoipa::path(
    get,
    path = "/api/menu/latest",
    params(PageQuery),
    responses(
        (status = 200, description = "Latest menu per hotel", body = Paginated<MenuWithHotelDto>)
    ),
    tags = ["menu"],
    operation_id = "menusLatest"
)]
#[get("/latest")]
pub async fn latest(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<MenuWithHotelDto>>> {
    let query = query.into_inner();
    let records = state
        .menus
        .latest_per_hotel(query.window())
        .await
        .map_err(map_menu_error)?;

    let rows = records.into_iter().map(MenuWithHotelDto::from).collect();
    Ok(web::Json(Paginated::from_overfetch(rows, query)))
}

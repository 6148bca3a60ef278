//! OpenAPI surface aggregation.

use utoipa::OpenApi;

use crate::inbound::http::auth::{
    DirectLoginRequest, SendOtpRequest, SendOtpResponse, TokenResponse, VerifyOtpRequest,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::hotels::{DashboardResponse, HotelProfile};
use crate::inbound::http::menus::{MenuDto, MenuWithHotelDto, UploadResponse};
use crate::inbound::http::pagination::Paginated;
use crate::domain::{SubscriptionKeys, WebPushSubscription};
use crate::inbound::http::push::{
    SubscribeRequest, SubscribeResponse, SubscriptionDto, UnsubscribeRequest, UnsubscribeResponse,
    VapidKeyResponse,
};

/// Public OpenAPI document for the REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::send_otp,
        crate::inbound::http::auth::verify_otp,
        crate::inbound::http::auth::direct_login,
        crate::inbound::http::hotels::dashboard,
        crate::inbound::http::menus::upload,
        crate::inbound::http::menus::history,
        crate::inbound::http::menus::today,
        crate::inbound::http::menus::latest,
        crate::inbound::http::push::vapid_public_key,
        crate::inbound::http::push::subscribe,
        crate::inbound::http::push::unsubscribe,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        ErrorBody,
        SendOtpRequest,
        SendOtpResponse,
        VerifyOtpRequest,
        DirectLoginRequest,
        TokenResponse,
        HotelProfile,
        DashboardResponse,
        MenuDto,
        MenuWithHotelDto,
        UploadResponse,
        Paginated<MenuDto>,
        Paginated<MenuWithHotelDto>,
        VapidKeyResponse,
        SubscriptionKeys,
        WebPushSubscription,
        SubscribeRequest,
        SubscriptionDto,
        SubscribeResponse,
        UnsubscribeRequest,
        UnsubscribeResponse,
    )),
    tags(
        (name = "auth", description = "OTP issuance and session tokens"),
        (name = "hotel", description = "Hotel profile"),
        (name = "menu", description = "Daily menu publishing and listings"),
        (name = "push", description = "Web-push subscription registry"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

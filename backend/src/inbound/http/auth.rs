//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/auth/send-otp     {"mobileNumber": "..."}
//! POST /api/auth/verify-otp   {"mobileNumber": "...", "otp": "...", ...}
//! POST /api/auth/direct-login {"mobileNumber": "...", ...}
//! ```

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, MobileNumber, OtpCode, ProfileFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::rate_limit::RateLimiter;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/auth/send-otp`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// Number to issue the code to.
    pub mobile_number: Option<String>,
}

/// Response body for `POST /api/auth/send-otp`.
///
/// The issued code is echoed back the way the SMS mock mode expects; do not
/// enable this response field pattern against a production SMS fleet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The code that was issued.
    pub mock_otp: String,
}

/// Request body for `POST /api/auth/verify-otp`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    /// Number the code was issued to.
    pub mobile_number: Option<String>,
    /// The submitted code.
    pub otp: Option<String>,
    /// Optional contact name to store on the account.
    pub name: Option<String>,
    /// Optional display name to store on the account.
    pub hotel_name: Option<String>,
}

/// Request body for `POST /api/auth/direct-login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectLoginRequest {
    /// Login identity.
    pub mobile_number: Option<String>,
    /// Optional contact name to store on the account.
    pub name: Option<String>,
    /// Optional display name to store on the account.
    pub hotel_name: Option<String>,
}

/// Response body for both login endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Signed seven-day session token.
    pub token: String,
}

fn parse_mobile_number(raw: Option<String>) -> Result<MobileNumber, Error> {
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::invalid_request("Mobile number is required"))?;
    MobileNumber::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

fn rate_limit_key(req: &HttpRequest) -> String {
    req.peer_addr()
        .map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}

/// Issue (or overwrite) a one-time code for a mobile number.
#[utoipa::path(
    post,
    path = "/api/auth/send-otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code issued", body = SendOtpResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody),
        (status = 429, description = "Rate limited", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "sendOtp"
)]
#[post("/send-otp")]
pub async fn send_otp(
    state: web::Data<HttpState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    payload: web::Json<SendOtpRequest>,
) -> ApiResult<web::Json<SendOtpResponse>> {
    limiter.check(&rate_limit_key(&req))?;
    let mobile_number = parse_mobile_number(payload.into_inner().mobile_number)?;

    let code = state.auth.send_otp(mobile_number).await?;
    Ok(web::Json(SendOtpResponse {
        success: true,
        message: "OTP sent successfully".to_owned(),
        mock_otp: code.as_ref().to_owned(),
    }))
}

/// Verify a one-time code and return a session token.
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Code verified", body = TokenResponse),
        (status = 400, description = "Invalid or expired code", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "verifyOtp"
)]
#[post("/verify-otp")]
pub async fn verify_otp(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyOtpRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let VerifyOtpRequest {
        mobile_number,
        otp,
        name,
        hotel_name,
    } = payload.into_inner();
    let otp = otp
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::invalid_request("Mobile number and OTP are required"))?;
    let mobile_number = parse_mobile_number(mobile_number)?;

    let token = state
        .auth
        .verify_otp(
            mobile_number,
            OtpCode::new(otp),
            ProfileFields { name, hotel_name },
        )
        .await?;
    Ok(web::Json(TokenResponse {
        success: true,
        message: "OTP verified successfully".to_owned(),
        token,
    }))
}

/// Log in without an OTP check.
#[utoipa::path(
    post,
    path = "/api/auth/direct-login",
    request_body = DirectLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = TokenResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "directLogin"
)]
#[post("/direct-login")]
pub async fn direct_login(
    state: web::Data<HttpState>,
    payload: web::Json<DirectLoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let DirectLoginRequest {
        mobile_number,
        name,
        hotel_name,
    } = payload.into_inner();
    let mobile_number = parse_mobile_number(mobile_number)?;

    let token = state
        .auth
        .direct_login(mobile_number, ProfileFields { name, hotel_name })
        .await?;
    Ok(web::Json(TokenResponse {
        success: true,
        message: "Login successful".to_owned(),
        token,
    }))
}

//! OTP login flows and account upsert.
//!
//! `send-otp` issues a five-digit code and tries the SMS relay; delivery is
//! best-effort and never fails the request. `verify-otp` consumes the code
//! (single use), then creates or refreshes the hotel account and returns a
//! session token. `direct-login` is the same minus the code check.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::domain::ports::{
    HotelRepository, HotelRepositoryError, OtpRepository, OtpRepositoryError, SmsRelay,
};
use crate::domain::token::TokenCodec;
use crate::domain::{Error, Hotel, MobileNumber, OneTimeCode, OtpCode};

fn map_hotel_error(error: HotelRepositoryError) -> Error {
    match error {
        HotelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hotel repository unavailable: {message}"))
        }
        HotelRepositoryError::Query { message } => {
            Error::internal(format!("hotel repository error: {message}"))
        }
        HotelRepositoryError::DuplicateMobileNumber => {
            Error::internal("hotel registration raced and lost")
        }
    }
}

fn map_otp_error(error: OtpRepositoryError) -> Error {
    match error {
        OtpRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("one-time code repository unavailable: {message}"))
        }
        OtpRepositoryError::Query { message } => {
            Error::internal(format!("one-time code repository error: {message}"))
        }
    }
}

/// Optional profile fields submitted alongside a login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    /// Contact person name.
    pub name: Option<String>,
    /// Hotel display name.
    pub hotel_name: Option<String>,
}

/// Phone-number authentication flows.
pub struct AuthService {
    hotels: Arc<dyn HotelRepository>,
    codes: Arc<dyn OtpRepository>,
    sms: Arc<dyn SmsRelay>,
    tokens: TokenCodec,
    otp_ttl: Duration,
}

impl AuthService {
    /// Build the service over its collaborator ports.
    pub fn new(
        hotels: Arc<dyn HotelRepository>,
        codes: Arc<dyn OtpRepository>,
        sms: Arc<dyn SmsRelay>,
        tokens: TokenCodec,
        otp_ttl: std::time::Duration,
    ) -> Self {
        Self {
            hotels,
            codes,
            sms,
            tokens,
            otp_ttl: Duration::from_std(otp_ttl).unwrap_or_else(|_| Duration::seconds(500)),
        }
    }

    /// Issue (or overwrite) the one-time code for a number and attempt SMS
    /// delivery. Returns the issued code so the handler can echo it.
    pub async fn send_otp(&self, mobile_number: MobileNumber) -> Result<OtpCode, Error> {
        let mut rng = SmallRng::from_entropy();
        let code = OtpCode::generate(&mut rng);

        self.codes
            .upsert(&OneTimeCode {
                mobile_number: mobile_number.clone(),
                code: code.clone(),
                created_at: Utc::now(),
            })
            .await
            .map_err(map_otp_error)?;

        let message = format!(
            "Your Hotel Login OTP is: {code}. Please do not share this with anyone."
        );
        match self.sms.send(&mobile_number, &message).await {
            Ok(()) => info!(%mobile_number, "one-time code dispatched"),
            Err(error) => {
                // Delivery is best-effort; the code remains valid either way.
                warn!(%mobile_number, %error, "sms relay failed");
            }
        }

        Ok(code)
    }

    /// Verify and consume a one-time code, then log the hotel in.
    pub async fn verify_otp(
        &self,
        mobile_number: MobileNumber,
        code: OtpCode,
        profile: ProfileFields,
    ) -> Result<String, Error> {
        let issued_after = Utc::now() - self.otp_ttl;
        let consumed = self
            .codes
            .consume(&mobile_number, &code, issued_after)
            .await
            .map_err(map_otp_error)?;
        if !consumed {
            return Err(Error::invalid_request("Invalid or expired OTP"));
        }

        let hotel = self.upsert_hotel(mobile_number, profile).await?;
        self.tokens.issue(hotel.id, hotel.role, Utc::now())
    }

    /// Log a hotel in without an OTP check.
    pub async fn direct_login(
        &self,
        mobile_number: MobileNumber,
        profile: ProfileFields,
    ) -> Result<String, Error> {
        let hotel = self.upsert_hotel(mobile_number, profile).await?;
        self.tokens.issue(hotel.id, hotel.role, Utc::now())
    }

    /// Create the account on first login, or refresh its profile fields.
    async fn upsert_hotel(
        &self,
        mobile_number: MobileNumber,
        profile: ProfileFields,
    ) -> Result<Hotel, Error> {
        if let Some(mut hotel) = self
            .hotels
            .find_by_mobile_number(&mobile_number)
            .await
            .map_err(map_hotel_error)?
        {
            hotel.refresh_profile(profile.name, profile.hotel_name);
            self.hotels
                .update_profile(&hotel)
                .await
                .map_err(map_hotel_error)?;
            return Ok(hotel);
        }

        let hotel = Hotel::register(
            mobile_number.clone(),
            profile.name.clone(),
            profile.hotel_name.clone(),
            Utc::now(),
        );
        match self.hotels.insert(&hotel).await {
            Ok(()) => Ok(hotel),
            // Lost a first-login race: the row now exists, refresh it instead.
            Err(HotelRepositoryError::DuplicateMobileNumber) => {
                let mut existing = self
                    .hotels
                    .find_by_mobile_number(&mobile_number)
                    .await
                    .map_err(map_hotel_error)?
                    .ok_or_else(|| Error::internal("hotel vanished after duplicate insert"))?;
                existing.refresh_profile(profile.name, profile.hotel_name);
                self.hotels
                    .update_profile(&existing)
                    .await
                    .map_err(map_hotel_error)?;
                Ok(existing)
            }
            Err(error) => Err(map_hotel_error(error)),
        }
    }
}

//! Bearer-token extraction for protected routes.
//!
//! Handlers declare an [`AuthenticatedHotel`] parameter; extraction verifies
//! the `Authorization` header against the shared-secret codec and enforces
//! the `hotel` role. Missing or invalid tokens are unauthorized; a valid
//! token with any other role is forbidden.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, HotelId, Role, TokenCodec};

/// Identity proven by a valid hotel-role session token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedHotel {
    /// The authenticated hotel account.
    pub hotel_id: HotelId,
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedHotel, Error> {
    let codec = req
        .app_data::<web::Data<TokenCodec>>()
        .ok_or_else(|| Error::internal("token codec not configured"))?;

    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("No token, authorization denied"))?;
    let token = header
        .to_str()
        .map_err(|_| Error::unauthorized("Token is not valid"))?;

    let claims = codec.verify(token)?;
    if claims.role != Role::Hotel {
        return Err(Error::forbidden("Access denied: Requires hotel role"));
    }

    Ok(AuthenticatedHotel {
        hotel_id: HotelId::from_uuid(claims.hotel_id),
    })
}

impl FromRequest for AuthenticatedHotel {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

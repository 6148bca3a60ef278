//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs over a shared secret carrying `{hotelId, role}`
//! and a seven-day expiry. Verification rejects bad signatures and expired
//! tokens; role enforcement is the caller's job (the bearer extractor).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, HotelId, Role};

/// Token validity window.
const SESSION_TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Authenticated hotel account.
    pub hotel_id: Uuid,
    /// Account role; protected routes require [`Role::Hotel`].
    pub role: Role,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
    /// Issue instant as a Unix timestamp.
    pub iat: i64,
}

/// Signs and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    /// Build a codec from the configured shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a seven-day token for a hotel account.
    pub fn issue(&self, hotel_id: HotelId, role: Role, now: DateTime<Utc>) -> Result<String, Error> {
        let claims = SessionClaims {
            hotel_id: *hotel_id.as_uuid(),
            role,
            exp: (now + Duration::days(SESSION_TOKEN_TTL_DAYS)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal(format!("failed to sign session token: {err}")))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, Error> {
        // Clients may send the raw token or the full Authorization value.
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| Error::unauthorized("Token is not valid"))
    }
}

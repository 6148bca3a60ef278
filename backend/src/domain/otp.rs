//! One-time login codes.
//!
//! One active code exists per mobile number (the store upserts on the
//! number). Codes expire after [`DEFAULT_OTP_TTL`] and are consumed on
//! first successful verification.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::MobileNumber;

/// Default lifetime of an issued code.
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(500);

/// Five-digit verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Parse a client-submitted code without normalisation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a random code in `10000..=99999`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(10_000_u32..=99_999).to_string())
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// An issued, not-yet-consumed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode {
    /// Number the code was issued to.
    pub mobile_number: MobileNumber,
    /// The code itself.
    pub code: OtpCode,
    /// Issue timestamp; verification rejects codes older than the TTL.
    pub created_at: DateTime<Utc>,
}

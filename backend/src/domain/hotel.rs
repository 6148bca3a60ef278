//! Hotel account model.
//!
//! A hotel account is created on first successful login (OTP or direct) and
//! identified by its mobile number. Accounts are never deleted by this
//! system; subsequent logins may refresh the contact and display names.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised by hotel value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotelValidationError {
    /// The mobile number was empty after trimming.
    EmptyMobileNumber,
    /// The mobile number contained characters other than digits and a
    /// leading `+`, or fell outside the accepted length.
    InvalidMobileNumber,
}

impl fmt::Display for HotelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMobileNumber => write!(f, "mobile number must not be empty"),
            Self::InvalidMobileNumber => write!(
                f,
                "mobile number must be 7 to 15 digits with an optional leading +",
            ),
        }
    }
}

impl std::error::Error for HotelValidationError {}

/// Stable hotel identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelId(Uuid);

impl HotelId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for HotelId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Subscriber phone number in loosely E.164 shape.
///
/// ## Invariants
/// - Non-empty once trimmed.
/// - Digits only, with at most one leading `+`.
/// - Between 7 and 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate and construct a [`MobileNumber`].
    pub fn new(raw: impl Into<String>) -> Result<Self, HotelValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HotelValidationError::EmptyMobileNumber);
        }

        let digits: &str = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digit_count = digits.chars().count();
        if digit_count < 7 || digit_count > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(HotelValidationError::InvalidMobileNumber);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = HotelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role carried in session tokens.
///
/// Tokens minted by this system always carry [`Role::Hotel`]; anything else
/// decodes to [`Role::Unknown`] and is rejected by protected routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A hotel operator account.
    Hotel,
    /// Any role string this system does not recognise.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Database representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Unknown => "unknown",
        }
    }
}

/// Hotel account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    /// Stable identifier.
    pub id: HotelId,
    /// Unique login identity.
    pub mobile_number: MobileNumber,
    /// Contact person name; may be empty until provided at login.
    pub name: String,
    /// Display name shown to subscribers; may be empty until provided.
    pub hotel_name: String,
    /// Account role; always [`Role::Hotel`] for records created here.
    pub role: Role,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Hotel {
    /// Build a fresh account for a first-time login.
    pub fn register(
        mobile_number: MobileNumber,
        name: Option<String>,
        hotel_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: HotelId::random(),
            mobile_number,
            name: name.unwrap_or_default(),
            hotel_name: hotel_name.unwrap_or_default(),
            role: Role::Hotel,
            created_at: now,
        }
    }

    /// Refresh contact details, keeping existing values when none provided.
    pub fn refresh_profile(&mut self, name: Option<String>, hotel_name: Option<String>) {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if let Some(hotel_name) = hotel_name.filter(|n| !n.trim().is_empty()) {
            self.hotel_name = hotel_name;
        }
    }
}

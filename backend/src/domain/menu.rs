//! Daily menu records and the calendar-day rule.
//!
//! A hotel has at most one menu record per local calendar day. The rule is
//! enforced by the publish workflow (read latest, then decide), not by a
//! database constraint; see `menu_service` for the accepted race.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::HotelId;

/// Identifier of a stored menu record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(Uuid);

impl MenuId {
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

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published daily menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    /// Stable identifier.
    pub id: MenuId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Either a media-store URL or an inline `data:` URI.
    pub image_url: String,
    /// Free-text note shown alongside the photo.
    pub note: String,
    /// Publication instant; the calendar-day rule reads this in local time.
    pub date: DateTime<Utc>,
}

/// Local calendar day of a stored timestamp.
pub fn local_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Whether two instants fall on the same local calendar day.
///
/// This compares year, month, and day components in the server's local
/// timezone, not a rolling 24-hour window: 23:59 and 00:01 the next minute
/// are different days, while 00:01 and 23:59 of one date are the same day.
pub fn same_local_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    let (a, b) = (local_day(a), local_day(b));
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// UTC instants bounding the local calendar day containing `instant`.
///
/// Returns `None` for the degenerate case where local midnight does not
/// exist (a DST transition straddling 00:00).
pub fn local_day_bounds(instant: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day = local_day(instant);
    let start = day
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()?;
    let end = day
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

//! # Date Windows
//!
//! Calendar-day windows used to filter receipts for KPI reports.
//!
//! ```text
//!   ?from=2024-03-01&to=2024-03-02
//!
//!   start = 2024-03-01T00:00:00.000000Z   (inclusive)
//!   end   = 2024-03-02T23:59:59.999999Z   (inclusive)
//!
//!   Omitted or empty bound → open-ended on that side.
//!   from > to              → valid, matches nothing.
//! ```
//!
//! Days are UTC days. Receipt timestamps carry microsecond precision, so
//! `23:59:59.999999` is the last instant of a day.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive time range over receipt creation timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    /// A window with no bounds; matches every receipt.
    pub const fn unbounded() -> Self {
        DateWindow {
            start: None,
            end: None,
        }
    }

    /// Parses optional `YYYY-MM-DD` query values into a window.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::window::DateWindow;
    ///
    /// let window = DateWindow::parse(Some("2024-03-01"), None).unwrap();
    /// assert!(window.start.is_some());
    /// assert!(window.end.is_none());
    ///
    /// assert!(DateWindow::parse(Some("03/01/2024"), None).is_err());
    /// ```
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, ValidationError> {
        let start = parse_day("from", from)?
            .map(|day| at_time(day, 0, 0, 0, 0, "from"))
            .transpose()?;

        let end = parse_day("to", to)?
            .map(|day| at_time(day, 23, 59, 59, 999_999, "to"))
            .transpose()?;

        Ok(DateWindow { start, end })
    }
}

fn parse_day(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| invalid_date(field, "expected YYYY-MM-DD"))
}

fn at_time(
    day: NaiveDate,
    hour: u32,
    min: u32,
    sec: u32,
    micro: u32,
    field: &str,
) -> Result<DateTime<Utc>, ValidationError> {
    NaiveTime::from_hms_micro_opt(hour, min, sec, micro)
        .map(|time| day.and_time(time).and_utc())
        .ok_or_else(|| invalid_date(field, "time of day out of range"))
}

fn invalid_date(field: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

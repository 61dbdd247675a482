//! Calendar feature derivation from invoice dates

use crate::{Result, RetailDataError};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date-time layout of the raw invoice export, e.g. "25/9/2011 14:30".
///
/// Day, month and hour may appear without a leading zero.
pub const INVOICE_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parse a raw invoice date-time string, discarding the time of day.
pub fn parse_invoice_date(raw: &str) -> Result<NaiveDate> {
    NaiveDateTime::parse_from_str(raw.trim(), INVOICE_DATE_FORMAT)
        .map(|dt| dt.date())
        .map_err(|err| {
            RetailDataError::DateParse(format!(
                "invoice date '{}' does not match d/M/yyyy H:mm: {}",
                raw, err
            ))
        })
}

/// Calendar fields derived from an invoice date.
///
/// `week` is the ISO 8601 week number, so dates in the first days of January
/// can carry week 52 or 53 while `year` stays the calendar year.
/// `day_of_week` runs 1 (Sunday) through 7 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Calendar year
    pub year: i32,
    /// Month of year (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// ISO week number (1-53)
    pub week: u32,
    /// Day of week, 1 = Sunday through 7 = Saturday
    pub day_of_week: u32,
}

impl CalendarFeatures {
    /// Derive all calendar fields from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            week: date.iso_week().week(),
            day_of_week: date.weekday().num_days_from_sunday() + 1,
        }
    }
}

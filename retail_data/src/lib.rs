//! # Retail Data
//!
//! `retail_data` provides the record types and loading helpers shared by the
//! sales forecasting pipeline: raw invoice lines ingested from CSV exports,
//! and the calendar features derived from their invoice dates.
//!
//! ## Usage Example
//!
//! ```
//! use retail_data::calendar::parse_invoice_date;
//! use retail_data::{FeaturizedLine, TransactionLine};
//!
//! let line = TransactionLine {
//!     country: "United Kingdom".to_string(),
//!     stock_code: "85123A".to_string(),
//!     invoice_date: parse_invoice_date("1/12/2010 8:26").unwrap(),
//!     quantity: 6,
//!     unit_price: 2.55,
//! };
//!
//! let featurized = FeaturizedLine::new(line);
//! assert_eq!(featurized.calendar.year, 2010);
//! assert_eq!(featurized.calendar.week, 48);
//! assert_eq!(featurized.calendar.day_of_week, 4); // Wednesday, 1 = Sunday
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Calendar feature derivation
pub mod calendar;
// CSV ingestion
pub mod ingest;
// Synthetic data helpers
pub mod utils;

pub use calendar::CalendarFeatures;
pub use ingest::{load_csv, load_csv_many, RawInvoiceLine};

/// Errors that can occur while loading or preparing retail records
#[derive(Error, Debug)]
pub enum RetailDataError {
    /// Malformed record or schema mismatch in a CSV source
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Invoice date string that does not match the expected layout
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for RetailDataError {
    fn from(err: csv::Error) -> Self {
        RetailDataError::Ingestion(err.to_string())
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, RetailDataError>;

/// One invoice line: a purchase or return of one item on one invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLine {
    /// Customer country
    pub country: String,
    /// Item identifier
    pub stock_code: String,
    /// Invoice date, time of day discarded at parse time
    pub invoice_date: NaiveDate,
    /// Units sold; negative for returns
    pub quantity: i64,
    /// Price per unit
    pub unit_price: f64,
}

impl TransactionLine {
    /// Build a transaction line from a raw CSV record.
    ///
    /// Fails with [`RetailDataError::DateParse`] when the invoice date string
    /// does not match the export layout; the record is never kept with a
    /// missing date.
    pub fn from_raw(raw: &RawInvoiceLine) -> Result<Self> {
        Ok(Self {
            country: raw.country.clone(),
            stock_code: raw.stock_code.clone(),
            invoice_date: calendar::parse_invoice_date(&raw.invoice_date)?,
            quantity: raw.quantity,
            unit_price: raw.unit_price,
        })
    }
}

/// Transaction line together with the calendar fields of its invoice date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturizedLine {
    /// The underlying transaction line
    pub line: TransactionLine,
    /// Calendar fields, always derived from `line.invoice_date`
    pub calendar: CalendarFeatures,
}

impl FeaturizedLine {
    /// Derive calendar features for a transaction line.
    pub fn new(line: TransactionLine) -> Self {
        let calendar = CalendarFeatures::from_date(line.invoice_date);
        Self { line, calendar }
    }
}

//! CSV ingestion for raw invoice-line exports
//!
//! Records are bound to an explicit schema by header name; a missing column
//! or a value of the wrong type is an ingestion error, never a coercion.

use crate::{Result, RetailDataError, TransactionLine};
use serde::Deserialize;
use std::path::Path;

/// Raw CSV record as it appears in the invoice export.
///
/// Columns beyond these five (invoice number, description, customer id) are
/// ignored. The invoice date stays a string here; parsing happens when the
/// record is turned into a [`TransactionLine`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvoiceLine {
    /// Customer country
    #[serde(rename = "Country")]
    pub country: String,
    /// Item identifier
    #[serde(rename = "StockCode")]
    pub stock_code: String,
    /// Invoice date-time string in d/M/yyyy H:mm layout
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    /// Units sold; negative for returns
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    /// Price per unit
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
}

/// Load invoice lines from a single CSV file.
///
/// The file must carry a header row naming the expected columns. Errors
/// identify the offending record by its position in the file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionLine>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let mut lines = Vec::new();
    for (position, record) in reader.deserialize::<RawInvoiceLine>().enumerate() {
        let raw = record.map_err(|err| {
            RetailDataError::Ingestion(format!(
                "{}: record {}: {}",
                path.display(),
                position + 1,
                err
            ))
        })?;
        lines.push(TransactionLine::from_raw(&raw)?);
    }

    Ok(lines)
}

/// Load and concatenate invoice lines from several CSV files.
///
/// The sources are read in the given order and treated as one logical input
/// set.
pub fn load_csv_many<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<TransactionLine>> {
    let mut lines = Vec::new();
    for path in paths {
        lines.extend(load_csv(path)?);
    }
    Ok(lines)
}

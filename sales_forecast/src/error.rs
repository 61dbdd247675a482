//! Error types for the sales_forecast crate

use retail_data::RetailDataError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    Data(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to model fitting or prediction
    #[error("Model error: {0}")]
    Model(String),

    /// Evaluator invoked on zero test rows
    #[error("Empty evaluation set: {0}")]
    EmptyEvaluationSet(String),

    /// Rollup target week absent from the predictions
    #[error("Missing week: no predictions fall in week {week} of {year}")]
    MissingWeek {
        /// Calendar year of the requested week
        year: i32,
        /// ISO week number of the requested week
        week: u32,
    },

    /// Error from loading or preparing retail records
    #[error("Retail data error: {0}")]
    RetailData(#[from] RetailDataError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

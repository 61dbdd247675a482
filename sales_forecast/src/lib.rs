//! # Sales Forecast
//!
//! A Rust library for forecasting weekly retail sales quantities from
//! invoice-line history.
//!
//! ## Pipeline
//!
//! - Derive calendar features from each line's invoice date
//! - Aggregate to a daily (country × item) grain
//! - Split at a fixed cutoff date (cutoff day included in training)
//! - Fit categorical indexers and a random forest regressor on the training
//!   partition only
//! - Score the holdout with mean absolute error
//! - Roll predictions up into the predicted total for one target week
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use retail_data::utils::generate_test_lines;
//! use sales_forecast::pipeline::{ForecastPipeline, PipelineConfig};
//!
//! // Three months of synthetic invoice lines around the default cutoff
//! let start = NaiveDate::from_ymd_opt(2011, 8, 1).unwrap();
//! let lines = generate_test_lines(150, start, 90, 7);
//!
//! let pipeline = ForecastPipeline::new(PipelineConfig::default())?;
//! let report = pipeline.run(&lines)?;
//!
//! assert!(report.metrics.mae >= 0.0);
//! println!("Mean Absolute Error (MAE): {}", report.metrics.mae);
//! println!("Predicted quantity for week 39 of 2011: {}", report.forecast_units);
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod aggregate;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod rollup;
pub mod split;

// Re-export commonly used types
pub use crate::aggregate::{aggregate_daily, DailyAggregate};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{FeaturePipeline, StringIndexer};
pub use crate::metrics::{evaluate_predictions, RegressionMetrics};
pub use crate::model::{
    FittedRegressor, RandomForestParams, RandomForestRegressor, Regressor,
};
pub use crate::pipeline::{ForecastPipeline, PipelineConfig, PipelineReport, Prediction};
pub use crate::rollup::{forecast_units, WeeklyTotals};
pub use crate::split::split_at_cutoff;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Regression models for the forecasting pipeline
//!
//! The pipeline treats its regressor as a capability: anything that can be
//! fit on feature vectors against a label and then score unseen vectors is
//! substitutable without touching the surrounding stages.

use crate::error::Result;
use std::fmt::Debug;

/// Regression model that can be fit on feature vectors and labels
pub trait Regressor: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedRegressor;

    /// Fit the model on training features and labels.
    ///
    /// The fitted model must depend on nothing beyond the rows it is given
    /// here; holdout rows are only ever seen by [`FittedRegressor::predict`].
    fn fit(&self, features: &[Vec<f64>], labels: &[f64]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Fitted regression model
pub trait FittedRegressor: Debug {
    /// Predict one value per feature vector.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod random_forest;

pub use random_forest::{FittedRandomForest, RandomForestParams, RandomForestRegressor};

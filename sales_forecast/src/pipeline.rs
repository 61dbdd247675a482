//! The end-to-end forecasting pipeline
//!
//! Stages run strictly in order, each over the full output of the one before
//! it. The two fitted artifacts (the categorical indexers and the forest)
//! are owned by the run and published immutably in the report; nothing is
//! read from ambient state.

use crate::aggregate::{aggregate_daily, DailyAggregate};
use crate::error::{ForecastError, Result};
use crate::features::{labels, FeaturePipeline};
use crate::metrics::{evaluate_predictions, RegressionMetrics};
use crate::model::{FittedRegressor, RandomForestParams, RandomForestRegressor, Regressor};
use crate::rollup::{forecast_units, WeeklyTotals};
use crate::split::split_at_cutoff;
use chrono::NaiveDate;
use retail_data::{FeaturizedLine, TransactionLine};

/// Configuration for a pipeline run.
///
/// The reference constants (cutoff date, target week, forest capacity) are
/// defaults here rather than literals buried in the stages, so a caller can
/// override any of them.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Last invoice date included in the training partition
    pub cutoff_date: NaiveDate,
    /// Calendar year of the week to forecast
    pub target_year: i32,
    /// ISO week number of the week to forecast
    pub target_week: u32,
    /// Random forest tuning parameters
    pub forest: RandomForestParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cutoff_date: NaiveDate::from_ymd_opt(2011, 9, 25).unwrap(),
            target_year: 2011,
            target_week: 39,
            forest: RandomForestParams::default(),
        }
    }
}

/// One held-out row together with the model's quantity estimate
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The aggregated row the prediction is for
    pub row: DailyAggregate,
    /// Predicted quantity
    pub prediction: f64,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Accuracy of the model on the held-out rows
    pub metrics: RegressionMetrics,
    /// Predicted total quantity for the target week, before rounding
    pub weekly_total: f64,
    /// The target week's total in whole units, truncated toward zero
    pub forecast_units: i64,
    /// Number of aggregated rows the model was fit on
    pub train_rows: usize,
    /// Number of aggregated rows held out
    pub test_rows: usize,
    /// Per-row predictions for the held-out partition
    pub predictions: Vec<Prediction>,
}

/// End-to-end weekly sales forecasting pipeline
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: PipelineConfig,
    model: RandomForestRegressor,
}

impl ForecastPipeline {
    /// Create a pipeline from an explicit configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if config.target_week == 0 || config.target_week > 53 {
            return Err(ForecastError::InvalidParameter(format!(
                "Target week must be between 1 and 53, got {}",
                config.target_week
            )));
        }

        let model = RandomForestRegressor::new(config.forest)?;
        Ok(Self { config, model })
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over a set of invoice lines.
    ///
    /// Derives calendar features, aggregates to the daily (country × item)
    /// grain, splits at the cutoff date, fits the indexers and the forest on
    /// the training partition only, scores the holdout, and rolls the
    /// predictions up into the target week's total. Any stage failure aborts
    /// the run; no partial report is produced.
    pub fn run(&self, lines: &[TransactionLine]) -> Result<PipelineReport> {
        let featurized: Vec<FeaturizedLine> =
            lines.iter().cloned().map(FeaturizedLine::new).collect();
        let aggregated = aggregate_daily(&featurized);
        let (train, test) = split_at_cutoff(aggregated, self.config.cutoff_date);
        let train_rows = train.len();
        let test_rows = test.len();

        if test.is_empty() {
            return Err(ForecastError::EmptyEvaluationSet(format!(
                "no aggregated rows after the {} cutoff",
                self.config.cutoff_date
            )));
        }

        // Both fitted stages see the training partition only
        let features = FeaturePipeline::fit(&train);
        let fitted = self.model.fit(&features.transform(&train), &labels(&train))?;

        let predicted = fitted.predict(&features.transform(&test))?;
        let metrics = evaluate_predictions(&predicted, &labels(&test))?;

        let predictions: Vec<Prediction> = test
            .into_iter()
            .zip(predicted)
            .map(|(row, prediction)| Prediction { row, prediction })
            .collect();

        let weekly = WeeklyTotals::from_predictions(&predictions);
        let weekly_total = weekly.total_for(self.config.target_year, self.config.target_week)?;

        Ok(PipelineReport {
            metrics,
            weekly_total,
            forecast_units: forecast_units(weekly_total),
            train_rows,
            test_rows,
            predictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_target_weeks() {
        for week in [0, 54] {
            let config = PipelineConfig {
                target_week: week,
                ..Default::default()
            };
            assert!(ForecastPipeline::new(config).is_err());
        }
    }

    #[test]
    fn rejects_degenerate_forest_parameters() {
        let config = PipelineConfig {
            forest: RandomForestParams {
                num_trees: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(ForecastPipeline::new(config).is_err());
    }

    #[test]
    fn default_config_matches_the_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.cutoff_date,
            NaiveDate::from_ymd_opt(2011, 9, 25).unwrap()
        );
        assert_eq!(config.target_year, 2011);
        assert_eq!(config.target_week, 39);
        assert_eq!(config.forest.max_bins, 4000);
    }
}

//! Metrics for evaluating forecast accuracy

use crate::error::{ForecastError, Result};

/// Regression accuracy metrics
#[derive(Debug, Clone)]
pub struct RegressionMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

impl std::fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Regression Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        Ok(())
    }
}

/// Calculate accuracy metrics for predictions against actual values.
///
/// Fails with [`ForecastError::EmptyEvaluationSet`] when there is nothing to
/// evaluate (the mean is undefined). Negative actuals, as produced by
/// return-heavy days, need no special handling.
pub fn evaluate_predictions(predictions: &[f64], actuals: &[f64]) -> Result<RegressionMetrics> {
    if predictions.is_empty() && actuals.is_empty() {
        return Err(ForecastError::EmptyEvaluationSet(
            "no held-out rows to evaluate".to_string(),
        ));
    }
    if predictions.len() != actuals.len() {
        return Err(ForecastError::Data(format!(
            "Predictions length ({}) doesn't match actuals length ({})",
            predictions.len(),
            actuals.len()
        )));
    }

    let n = predictions.len() as f64;
    let errors: Vec<f64> = predictions
        .iter()
        .zip(actuals.iter())
        .map(|(&p, &a)| p - a)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    Ok(RegressionMetrics { mae, mse, rmse })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_evaluation_set_is_an_error() {
        let err = evaluate_predictions(&[], &[]).unwrap_err();
        assert!(matches!(err, ForecastError::EmptyEvaluationSet(_)));
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        let err = evaluate_predictions(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, ForecastError::Data(_)));
    }

    #[test]
    fn exact_predictions_score_zero() {
        let metrics = evaluate_predictions(&[3.0, -4.0, 0.5], &[3.0, -4.0, 0.5]).unwrap();
        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.rmse, 0.0);
    }

    #[test]
    fn known_errors_produce_known_metrics() {
        // Errors of -1, +1 and +4
        let metrics = evaluate_predictions(&[1.0, 3.0, 10.0], &[2.0, 2.0, 6.0]).unwrap();
        assert_eq!(metrics.mae, 2.0);
        assert_eq!(metrics.mse, 6.0);
        assert!((metrics.rmse - 6.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn negative_actuals_need_no_special_casing() {
        let metrics = evaluate_predictions(&[-2.0, 1.0], &[-5.0, -1.0]).unwrap();
        assert_eq!(metrics.mae, 2.5);
    }

    #[test]
    fn mae_is_never_negative() {
        let metrics = evaluate_predictions(&[10.0, -10.0], &[-10.0, 10.0]).unwrap();
        assert!(metrics.mae >= 0.0);
        assert_eq!(metrics.mae, 20.0);
    }
}

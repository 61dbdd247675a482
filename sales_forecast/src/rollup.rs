//! Weekly rollup of per-row predictions

use crate::error::{ForecastError, Result};
use crate::pipeline::Prediction;
use std::collections::BTreeMap;

/// Sum of predicted quantities per (calendar year, ISO week)
#[derive(Debug, Clone, Default)]
pub struct WeeklyTotals {
    totals: BTreeMap<(i32, u32), f64>,
}

impl WeeklyTotals {
    /// Group predictions by year and week, summing the predicted quantities.
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut totals = BTreeMap::new();
        for prediction in predictions {
            let key = (prediction.row.calendar.year, prediction.row.calendar.week);
            *totals.entry(key).or_insert(0.0) += prediction.prediction;
        }
        Self { totals }
    }

    /// Predicted total for one (year, week), before any rounding.
    ///
    /// Fails with [`ForecastError::MissingWeek`] when no prediction falls in
    /// the requested week; an absent week is not a zero forecast.
    pub fn total_for(&self, year: i32, week: u32) -> Result<f64> {
        self.totals
            .get(&(year, week))
            .copied()
            .ok_or(ForecastError::MissingWeek { year, week })
    }

    /// Iterate totals in (year, week) order.
    pub fn iter(&self) -> impl Iterator<Item = (&(i32, u32), &f64)> {
        self.totals.iter()
    }

    /// Number of distinct weeks present
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether any week is present
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Report a weekly total as whole units, truncating toward zero.
pub fn forecast_units(total: f64) -> i64 {
    total.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DailyAggregate;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use retail_data::CalendarFeatures;
    use rstest::rstest;

    fn prediction(year: i32, month: u32, day: u32, value: f64) -> Prediction {
        let invoice_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        Prediction {
            row: DailyAggregate {
                country: "United Kingdom".to_string(),
                stock_code: "85123A".to_string(),
                invoice_date,
                calendar: CalendarFeatures::from_date(invoice_date),
                quantity: 0,
                unit_price: 1.0,
            },
            prediction: value,
        }
    }

    #[test]
    fn sums_predictions_per_week() {
        // 2011-09-26 through 2011-10-02 is ISO week 39; 2011-10-03 opens week 40
        let predictions = vec![
            prediction(2011, 9, 26, 10.5),
            prediction(2011, 9, 28, 4.25),
            prediction(2011, 10, 2, 1.0),
            prediction(2011, 10, 3, 99.0),
        ];

        let weekly = WeeklyTotals::from_predictions(&predictions);
        assert_eq!(weekly.len(), 2);
        assert!((weekly.total_for(2011, 39).unwrap() - 15.75).abs() < 1e-9);
        assert!((weekly.total_for(2011, 40).unwrap() - 99.0).abs() < 1e-9);
    }

    #[test]
    fn absent_week_is_an_error_not_zero() {
        let weekly = WeeklyTotals::from_predictions(&[prediction(2011, 10, 3, 5.0)]);

        let err = weekly.total_for(2011, 39).unwrap_err();
        match err {
            ForecastError::MissingWeek { year, week } => {
                assert_eq!(year, 2011);
                assert_eq!(week, 39);
            }
            other => panic!("expected MissingWeek, got {:?}", other),
        }
    }

    #[test]
    fn no_predictions_yields_no_weeks() {
        let weekly = WeeklyTotals::from_predictions(&[]);
        assert!(weekly.is_empty());
        assert!(weekly.total_for(2011, 39).is_err());
    }

    #[rstest]
    #[case(41.9, 41)]
    #[case(41.1, 41)]
    #[case(-3.7, -3)]
    #[case(0.0, 0)]
    fn units_truncate_toward_zero(#[case] total: f64, #[case] units: i64) {
        assert_eq!(forecast_units(total), units);
    }
}

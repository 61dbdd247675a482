//! Categorical indexing and feature-vector assembly
//!
//! Both stages are fit on the training partition only and applied unchanged
//! to the holdout; `transform` never mutates the fitted state.

use crate::aggregate::DailyAggregate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of entries in an assembled feature vector
pub const FEATURE_COUNT: usize = 7;

/// Dense integer encoding for a string-valued category.
///
/// Indices are assigned by descending training-time frequency, ties broken
/// lexicographically, so fitting the same values always yields the same
/// vocabulary. A value never seen during fitting maps to the reserved index
/// [`StringIndexer::unseen_index`] instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringIndexer {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
}

impl StringIndexer {
    /// Learn the vocabulary from training-time values.
    pub fn fit<S: AsRef<str>>(values: &[S]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in values {
            *counts.entry(value.as_ref()).or_insert(0) += 1;
        }

        let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let vocabulary: Vec<String> = ordered.into_iter().map(|(v, _)| v.to_string()).collect();
        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        Self { vocabulary, index }
    }

    /// Index for a value, or the reserved unseen index.
    pub fn transform(&self, value: &str) -> usize {
        self.index
            .get(value)
            .copied()
            .unwrap_or_else(|| self.unseen_index())
    }

    /// Reserved index for values outside the fitted vocabulary
    pub fn unseen_index(&self) -> usize {
        self.vocabulary.len()
    }

    /// The fitted vocabulary, most frequent value first
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

/// Fitted feature-encoding stage: one indexer per categorical column plus
/// the vector assembler.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    country_indexer: StringIndexer,
    stock_code_indexer: StringIndexer,
}

impl FeaturePipeline {
    /// Fit both categorical indexers on the training rows.
    pub fn fit(train: &[DailyAggregate]) -> Self {
        let countries: Vec<&str> = train.iter().map(|row| row.country.as_str()).collect();
        let stock_codes: Vec<&str> = train.iter().map(|row| row.stock_code.as_str()).collect();

        Self {
            country_indexer: StringIndexer::fit(&countries),
            stock_code_indexer: StringIndexer::fit(&stock_codes),
        }
    }

    /// Assemble the feature vector for one aggregated row.
    ///
    /// Order: country index, stock-code index, unit price, year, month, day,
    /// day of week. The quantity label and the week number are left out of
    /// the vector.
    pub fn assemble(&self, row: &DailyAggregate) -> Vec<f64> {
        vec![
            self.country_indexer.transform(&row.country) as f64,
            self.stock_code_indexer.transform(&row.stock_code) as f64,
            row.unit_price,
            f64::from(row.calendar.year),
            f64::from(row.calendar.month),
            f64::from(row.calendar.day),
            f64::from(row.calendar.day_of_week),
        ]
    }

    /// Assemble feature vectors for a set of rows.
    pub fn transform(&self, rows: &[DailyAggregate]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.assemble(row)).collect()
    }

    /// The fitted country indexer
    pub fn country_indexer(&self) -> &StringIndexer {
        &self.country_indexer
    }

    /// The fitted stock-code indexer
    pub fn stock_code_indexer(&self) -> &StringIndexer {
        &self.stock_code_indexer
    }
}

/// Quantity labels for a set of rows, as doubles.
pub fn labels(rows: &[DailyAggregate]) -> Vec<f64> {
    rows.iter().map(|row| row.quantity as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use retail_data::CalendarFeatures;

    fn row(country: &str, stock_code: &str, day: u32, unit_price: f64) -> DailyAggregate {
        let invoice_date = NaiveDate::from_ymd_opt(2011, 9, day).unwrap();
        DailyAggregate {
            country: country.to_string(),
            stock_code: stock_code.to_string(),
            invoice_date,
            calendar: CalendarFeatures::from_date(invoice_date),
            quantity: 5,
            unit_price,
        }
    }

    #[test]
    fn indexer_orders_by_descending_frequency() {
        let indexer = StringIndexer::fit(&["b", "a", "a", "c", "a", "b"]);

        assert_eq!(indexer.vocabulary(), &["a", "b", "c"]);
        assert_eq!(indexer.transform("a"), 0);
        assert_eq!(indexer.transform("b"), 1);
        assert_eq!(indexer.transform("c"), 2);
    }

    #[test]
    fn indexer_breaks_frequency_ties_lexicographically() {
        let indexer = StringIndexer::fit(&["z", "m", "a"]);
        assert_eq!(indexer.vocabulary(), &["a", "m", "z"]);
    }

    #[test]
    fn fitting_twice_yields_identical_vocabularies() {
        let values = ["x", "y", "x", "z", "y", "x"];
        let first = StringIndexer::fit(&values);
        let second = StringIndexer::fit(&values);
        assert_eq!(first.vocabulary(), second.vocabulary());
    }

    #[test]
    fn unseen_values_map_to_the_reserved_index() {
        let indexer = StringIndexer::fit(&["a", "b"]);
        assert_eq!(indexer.unseen_index(), 2);
        assert_eq!(indexer.transform("never-seen"), 2);
    }

    #[test]
    fn transform_is_idempotent() {
        let indexer = StringIndexer::fit(&["a", "b", "a"]);
        for _ in 0..3 {
            assert_eq!(indexer.transform("a"), 0);
            assert_eq!(indexer.transform("q"), indexer.unseen_index());
        }
    }

    #[test]
    fn assembles_the_fixed_order_vector() {
        let train = vec![
            row("United Kingdom", "85123A", 19, 2.0),
            row("United Kingdom", "71053", 20, 3.0),
            row("France", "85123A", 21, 4.0),
        ];
        let pipeline = FeaturePipeline::fit(&train);

        let vector = pipeline.assemble(&row("France", "85123A", 21, 4.0));
        assert_eq!(vector.len(), FEATURE_COUNT);
        // [country index, stock index, unit price, year, month, day, day of week]
        assert_eq!(vector[0], 1.0); // France is less frequent than United Kingdom
        assert_eq!(vector[1], 0.0); // 85123A is the most frequent stock code
        assert_eq!(vector[2], 4.0);
        assert_eq!(vector[3], 2011.0);
        assert_eq!(vector[4], 9.0);
        assert_eq!(vector[5], 21.0);
        assert_eq!(vector[6], 4.0); // 2011-09-21 is a Wednesday
    }

    #[test]
    fn unseen_stock_code_still_assembles() {
        let train = vec![row("United Kingdom", "85123A", 19, 2.0)];
        let pipeline = FeaturePipeline::fit(&train);

        let vector = pipeline.assemble(&row("United Kingdom", "99999Z", 26, 1.0));
        assert_eq!(vector[1], pipeline.stock_code_indexer().unseen_index() as f64);
    }

    #[test]
    fn labels_are_the_quantities_as_doubles() {
        let rows = vec![row("United Kingdom", "85123A", 19, 2.0)];
        assert_eq!(labels(&rows), vec![5.0]);
    }
}

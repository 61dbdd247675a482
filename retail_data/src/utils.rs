//! Utility helpers for building synthetic retail datasets

use crate::TransactionLine;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COUNTRIES: [&str; 3] = ["United Kingdom", "France", "Germany"];
const STOCK_CODES: [&str; 5] = ["85123A", "71053", "84406B", "22752", "21730"];

/// Generate synthetic invoice lines for testing and examples.
///
/// Lines span a handful of countries and item codes, with a small share of
/// returns (negative quantities). The same seed always yields the same
/// dataset.
///
/// # Arguments
/// * `num_lines` - Number of invoice lines to generate
/// * `start_date` - First possible invoice date
/// * `span_days` - Invoice dates are drawn from `start_date` plus `0..span_days`
/// * `seed` - RNG seed
///
/// # Returns
/// * Vector of invoice lines
pub fn generate_test_lines(
    num_lines: usize,
    start_date: NaiveDate,
    span_days: u64,
    seed: u64,
) -> Vec<TransactionLine> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines = Vec::with_capacity(num_lines);

    for _ in 0..num_lines {
        let offset = rng.gen_range(0..span_days.max(1));
        let invoice_date = start_date
            .checked_add_days(Days::new(offset))
            .unwrap_or(start_date);

        // A small share of lines are returns
        let quantity: i64 = if rng.gen_bool(0.05) {
            -rng.gen_range(1..10)
        } else {
            rng.gen_range(1..50)
        };

        lines.push(TransactionLine {
            country: COUNTRIES[rng.gen_range(0..COUNTRIES.len())].to_string(),
            stock_code: STOCK_CODES[rng.gen_range(0..STOCK_CODES.len())].to_string(),
            invoice_date,
            quantity,
            unit_price: rng.gen_range(0.5..20.0),
        });
    }

    lines
}

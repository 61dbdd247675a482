//! Train/test partitioning at a fixed cutoff date

use crate::aggregate::DailyAggregate;
use chrono::NaiveDate;

/// Partition aggregated rows into training and evaluation sets.
///
/// A row dated on or before the cutoff belongs to the training set; anything
/// later is held out. Every row lands in exactly one of the two partitions.
pub fn split_at_cutoff(
    rows: Vec<DailyAggregate>,
    cutoff: NaiveDate,
) -> (Vec<DailyAggregate>, Vec<DailyAggregate>) {
    rows.into_iter().partition(|row| row.invoice_date <= cutoff)
}

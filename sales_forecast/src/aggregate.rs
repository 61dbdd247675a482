//! Daily aggregation of invoice lines to the (country, item, day) grain

use chrono::NaiveDate;
use retail_data::{CalendarFeatures, FeaturizedLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the daily (country × item) sales summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// Customer country
    pub country: String,
    /// Item identifier
    pub stock_code: String,
    /// Invoice date of the group
    pub invoice_date: NaiveDate,
    /// Calendar fields of the invoice date
    pub calendar: CalendarFeatures,
    /// Net units sold across the group; negative when returns dominate
    pub quantity: i64,
    /// Mean unit price across the group
    pub unit_price: f64,
}

/// Collapse invoice lines into one row per distinct grouping key.
///
/// The key is the full (country, stock code, invoice date, calendar fields)
/// tuple; `quantity` is the exact sum over the group and `unit_price` the
/// arithmetic mean. Every input line lands in exactly one group, so group
/// sizes partition the input. An empty input yields an empty output.
/// Output order carries no meaning downstream.
pub fn aggregate_daily(lines: &[FeaturizedLine]) -> Vec<DailyAggregate> {
    struct Group {
        quantity: i64,
        price_sum: f64,
        members: usize,
    }

    let mut groups: BTreeMap<(String, String, NaiveDate, CalendarFeatures), Group> =
        BTreeMap::new();

    for featurized in lines {
        let key = (
            featurized.line.country.clone(),
            featurized.line.stock_code.clone(),
            featurized.line.invoice_date,
            featurized.calendar,
        );
        let group = groups.entry(key).or_insert(Group {
            quantity: 0,
            price_sum: 0.0,
            members: 0,
        });
        group.quantity += featurized.line.quantity;
        group.price_sum += featurized.line.unit_price;
        group.members += 1;
    }

    groups
        .into_iter()
        .map(
            |((country, stock_code, invoice_date, calendar), group)| DailyAggregate {
                country,
                stock_code,
                invoice_date,
                calendar,
                quantity: group.quantity,
                // A group always has at least one member
                unit_price: group.price_sum / group.members as f64,
            },
        )
        .collect()
}

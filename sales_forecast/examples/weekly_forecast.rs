//! End-to-end weekly forecast over an invoice-line dataset.
//!
//! Pass one or more CSV export paths to forecast from real data, or run with
//! no arguments to use a synthetic dataset:
//!
//! `cargo run --example weekly_forecast -- data/Online_Retail_part1.csv data/Online_Retail_part2.csv`

use chrono::NaiveDate;
use retail_data::load_csv_many;
use retail_data::utils::generate_test_lines;
use sales_forecast::pipeline::{ForecastPipeline, PipelineConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Sales Forecast: Weekly Forecast Example");
    println!("=======================================\n");

    let paths: Vec<String> = std::env::args().skip(1).collect();
    let lines = if paths.is_empty() {
        println!("No CSV paths given, generating synthetic invoice lines...");
        let start = NaiveDate::from_ymd_opt(2011, 8, 1).unwrap();
        generate_test_lines(2000, start, 90, 7)
    } else {
        println!("Loading {} CSV source(s)...", paths.len());
        load_csv_many(&paths)?
    };
    println!("Loaded {} invoice lines\n", lines.len());

    let config = PipelineConfig::default();
    println!("Cutoff date: {}", config.cutoff_date);
    println!(
        "Target week: week {} of {}\n",
        config.target_week, config.target_year
    );

    let pipeline = ForecastPipeline::new(config)?;
    let report = pipeline.run(&lines)?;

    println!(
        "Aggregated rows: {} train / {} test",
        report.train_rows, report.test_rows
    );
    println!("Mean Absolute Error (MAE): {}", report.metrics.mae);
    println!(
        "Predicted total quantity sold globally during week {} of {}: {}",
        pipeline.config().target_week,
        pipeline.config().target_year,
        report.forecast_units
    );

    Ok(())
}

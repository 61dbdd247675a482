use chrono::NaiveDate;
use retail_data::{load_csv, FeaturizedLine, RetailDataError};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a small invoice export in the real dataset's shape
fn create_sample_export() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(
        file,
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country"
    )
    .unwrap();
    writeln!(
        file,
        "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,1/12/2010 8:26,2.55,17850,United Kingdom"
    )
    .unwrap();
    writeln!(
        file,
        "536365,71053,WHITE METAL LANTERN,6,1/12/2010 8:26,3.39,17850,United Kingdom"
    )
    .unwrap();
    writeln!(
        file,
        "C536379,85123A,WHITE HANGING HEART T-LIGHT HOLDER,-1,2/12/2010 9:41,2.55,14527,France"
    )
    .unwrap();

    file
}

#[test]
fn test_full_ingest_workflow() {
    // 1. Create a sample export file
    let export = create_sample_export();

    // 2. Load it against the explicit schema
    let lines = load_csv(export.path()).unwrap();
    assert_eq!(lines.len(), 3);

    // 3. The time of day is discarded during parsing
    assert_eq!(
        lines[0].invoice_date,
        NaiveDate::from_ymd_opt(2010, 12, 1).unwrap()
    );

    // 4. Returns keep their negative quantity
    assert_eq!(lines[2].quantity, -1);
    assert_eq!(lines[2].country, "France");

    // 5. Calendar features follow from each line's invoice date
    let featurized: Vec<FeaturizedLine> = lines.into_iter().map(FeaturizedLine::new).collect();
    assert_eq!(featurized[0].calendar.year, 2010);
    assert_eq!(featurized[0].calendar.month, 12);
    assert_eq!(featurized[0].calendar.day, 1);
    assert_eq!(featurized[0].calendar.week, 48);
    assert_eq!(featurized[0].calendar.day_of_week, 4);

    // 6. A missing file surfaces as an error, not an empty dataset
    let result = load_csv("/nonexistent/online_retail.csv");
    assert!(result.is_err());
}

#[test]
fn test_malformed_date_fails_the_load() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "StockCode,Quantity,InvoiceDate,UnitPrice,Country").unwrap();
    writeln!(file, "85123A,6,1/12/2010 8:26,2.55,United Kingdom").unwrap();
    writeln!(file, "71053,3,December 2nd,3.39,United Kingdom").unwrap();

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(err, RetailDataError::DateParse(_)));
}

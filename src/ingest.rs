use chrono::NaiveDate;

use crate::constants::REQUIRED_COLUMNS;
use crate::error::{AppError, Result};
use crate::models::SalesRecord;

/// Parse an uploaded CSV document into sales records.
///
/// Header names are trimmed and matched case-insensitively; extra columns
/// are ignored. The whole document is rejected on the first missing column
/// or value that fails coercion, so a failed upload never inserts anything.
pub fn parse_sales_csv(text: &str) -> Result<Vec<SalesRecord>> {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::InvalidUpload(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    let column_index = |name: &str| -> Option<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    // All five columns must be present before any row is looked at
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column_index(column).ok_or_else(|| {
            AppError::InvalidUpload(format!("Column '{}' not found in uploaded file", column))
        })?;
    }
    let [date_idx, product_idx, region_idx, units_idx, revenue_idx] = indices;

    let mut records = Vec::new();

    // Row numbers are 1-based counting the header, so data starts at row 2
    for (offset, result) in reader.records().enumerate() {
        let row = offset + 2;
        let record = result
            .map_err(|e| AppError::InvalidUpload(format!("row {}: malformed CSV: {}", row, e)))?;

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let date = parse_date(field(date_idx))
            .ok_or_else(|| invalid_value(row, "date", field(date_idx)))?;

        let product = field(product_idx);
        if product.is_empty() {
            return Err(invalid_value(row, "product", product));
        }

        let region = field(region_idx);
        if region.is_empty() {
            return Err(invalid_value(row, "region", region));
        }

        let units_sold: i64 = field(units_idx)
            .parse()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| invalid_value(row, "units_sold", field(units_idx)))?;

        let revenue: f64 = field(revenue_idx)
            .parse()
            .ok()
            .filter(|r: &f64| r.is_finite() && *r >= 0.0)
            .ok_or_else(|| invalid_value(row, "revenue", field(revenue_idx)))?;

        records.push(SalesRecord {
            date,
            product: product.to_string(),
            region: region.to_string(),
            units_sold,
            revenue,
        });
    }

    Ok(records)
}

/// Serialize records back to CSV with the canonical header.
/// Output re-parses to the same rows, so exports can be re-uploaded.
pub fn write_sales_csv(records: &[SalesRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(REQUIRED_COLUMNS)?;
    for record in records {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.product.clone(),
            record.region.clone(),
            record.units_sold.to_string(),
            record.revenue.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    // Writer only ever receives UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Accepted date formats: ISO first, US-style slash dates as a fallback
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()
}

fn invalid_value(row: usize, column: &str, value: &str) -> AppError {
    AppError::InvalidUpload(format!("row {}: invalid {} '{}'", row, column, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CSV: &str = "\
date,product,region,units_sold,revenue
2024-06-01,Widget A,East,10,100
2024-06-02,Widget B,West,5,75.5
";

    #[test]
    fn test_parse_well_formed_csv() {
        let records = parse_sales_csv(GOOD_CSV).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product, "Widget A");
        assert_eq!(records[0].units_sold, 10);
        assert_eq!(records[1].revenue, 75.5);
        assert_eq!(records[1].date.to_string(), "2024-06-02");
    }

    #[test]
    fn test_parse_header_only_yields_no_records() {
        let records = parse_sales_csv("date,product,region,units_sold,revenue\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_headers_are_case_insensitive_and_trimmed() {
        let csv = "Date , PRODUCT,Region,Units_Sold,Revenue\n2024-06-01,Widget A,East,10,100\n";
        let records = parse_sales_csv(csv).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_bom_is_stripped() {
        let csv = format!("\u{FEFF}{}", GOOD_CSV);
        assert_eq!(parse_sales_csv(&csv).unwrap().len(), 2);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv =
            "date,product,region,units_sold,revenue,notes\n2024-06-01,Widget A,East,10,100,hi\n";
        let records = parse_sales_csv(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, 100.0);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv = "date,product,units_sold,revenue\n2024-06-01,Widget A,10,100\n";
        let err = parse_sales_csv(csv).unwrap_err();

        match err {
            AppError::InvalidUpload(msg) => assert!(msg.contains("'region'"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_value_reports_row_number() {
        let csv = "\
date,product,region,units_sold,revenue
2024-06-01,Widget A,East,10,100
2024-06-02,Widget B,West,many,75
";
        let err = parse_sales_csv(csv).unwrap_err();

        match err {
            AppError::InvalidUpload(msg) => {
                assert!(msg.contains("row 3"), "{}", msg);
                assert!(msg.contains("units_sold"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let units = "date,product,region,units_sold,revenue\n2024-06-01,A,East,-1,100\n";
        assert!(parse_sales_csv(units).is_err());

        let revenue = "date,product,region,units_sold,revenue\n2024-06-01,A,East,1,-5\n";
        assert!(parse_sales_csv(revenue).is_err());
    }

    #[test]
    fn test_slash_date_fallback() {
        let csv = "date,product,region,units_sold,revenue\n06/01/2024,Widget A,East,10,100\n";
        let records = parse_sales_csv(csv).unwrap();
        assert_eq!(records[0].date.to_string(), "2024-06-01");
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let csv = "date,product,region,units_sold,revenue\nJune 1st,Widget A,East,10,100\n";
        assert!(parse_sales_csv(csv).is_err());
    }

    #[test]
    fn test_export_round_trips() {
        let records = parse_sales_csv(GOOD_CSV).unwrap();
        let exported = write_sales_csv(&records).unwrap();
        let reparsed = parse_sales_csv(&exported).unwrap();

        assert_eq!(records, reparsed);
    }

    #[test]
    fn test_export_of_nothing_is_header_only() {
        let exported = write_sales_csv(&[]).unwrap();
        assert_eq!(exported.trim(), "date,product,region,units_sold,revenue");
    }
}

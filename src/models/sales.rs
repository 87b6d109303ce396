use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of uploaded retail transaction data.
///
/// Rows carry no identity beyond their values; duplicates are permitted and
/// the table's surrogate rowid never leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub region: String,
    pub units_sold: i64,
    pub revenue: f64,
}

impl SalesRecord {
    /// Calendar month this row falls in, as a sortable `YYYY-MM` key
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }
}

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::SalesRecord;

/// User-selected constraints narrowing the displayed dataset.
///
/// Absent fields leave that dimension unconstrained (the "All" selection).
/// Deserializes directly from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesFilter {
    pub region: Option<String>,
    pub product: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SalesFilter {
    /// Whether a single record satisfies every predicate
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some(region) = &self.region {
            if record.region != *region {
                return false;
            }
        }
        if let Some(product) = &self.product {
            if record.product != *product {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }
        true
    }

    /// Full scan over the loaded row set
    pub fn apply(&self, records: Vec<SalesRecord>) -> Vec<SalesRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// True when no predicate is set
    pub fn is_unconstrained(&self) -> bool {
        self.region.is_none()
            && self.product.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, product: &str, region: &str) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            product: product.to_string(),
            region: region.to_string(),
            units_sold: 1,
            revenue: 1.0,
        }
    }

    fn fixture() -> Vec<SalesRecord> {
        vec![
            record("2024-06-01", "Widget A", "East"),
            record("2024-06-02", "Widget B", "West"),
            record("2024-07-01", "Widget A", "West"),
        ]
    }

    #[test]
    fn test_unconstrained_filter_keeps_everything() {
        let filter = SalesFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(fixture()).len(), 3);
    }

    #[test]
    fn test_region_filter() {
        let filter = SalesFilter {
            region: Some("West".to_string()),
            ..Default::default()
        };
        let matched = filter.apply(fixture());
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|r| r.region == "West"));
    }

    #[test]
    fn test_product_and_region_combine() {
        let filter = SalesFilter {
            region: Some("West".to_string()),
            product: Some("Widget A".to_string()),
            ..Default::default()
        };
        let matched = filter.apply(fixture());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].date.to_string(), "2024-07-01");
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = SalesFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 6, 2),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            ..Default::default()
        };
        let matched = filter.apply(fixture());
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_no_match_yields_empty_not_error() {
        let filter = SalesFilter {
            region: Some("North".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(fixture()).is_empty());
    }

    #[test]
    fn test_region_match_is_exact() {
        let filter = SalesFilter {
            region: Some("east".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(fixture()).is_empty());
    }
}

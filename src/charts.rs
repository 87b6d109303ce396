//! Rendering layer: maps a filtered row set to chart-specification JSON for
//! the browser charting library. Everything here is a pure function over
//! `&[SalesRecord]`; an empty subset produces empty series, never an error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::SalesRecord;

/// Headline figures shown above the charts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_units: i64,
    pub record_count: usize,
}

/// One point of the revenue-over-time line chart
#[derive(Debug, Serialize)]
pub struct TimePoint {
    pub date: chrono::NaiveDate,
    pub revenue: f64,
}

/// One bar of the top-products chart
#[derive(Debug, Serialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: f64,
}

/// Region x product revenue grid. `values[i][j]` is the revenue for
/// `regions[i]` and `products[j]`; absent cells are 0.
#[derive(Debug, Serialize)]
pub struct Heatmap {
    pub regions: Vec<String>,
    pub products: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// One bar group of the monthly trend chart
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPoint {
    pub month: String,
    pub revenue: f64,
    pub units_sold: i64,
}

/// Pairwise Pearson correlations over the numeric columns. Undefined
/// entries (fewer than two rows, or zero variance) are null.
#[derive(Debug, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// The full dashboard payload for one filtered view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub kpis: Kpis,
    pub revenue_over_time: Vec<TimePoint>,
    pub top_products: Vec<ProductRevenue>,
    pub region_product_heatmap: Heatmap,
    pub monthly_trend: Vec<MonthPoint>,
    pub correlation: CorrelationMatrix,
}

/// Build every dashboard block from the same filtered subset
pub fn build_dashboard(records: &[SalesRecord]) -> Dashboard {
    Dashboard {
        kpis: kpis(records),
        revenue_over_time: revenue_over_time(records),
        top_products: top_products(records),
        region_product_heatmap: region_product_heatmap(records),
        monthly_trend: monthly_trend(records),
        correlation: correlation_matrix(records),
    }
}

fn kpis(records: &[SalesRecord]) -> Kpis {
    Kpis {
        total_revenue: records.iter().map(|r| r.revenue).sum(),
        total_units: records.iter().map(|r| r.units_sold).sum(),
        record_count: records.len(),
    }
}

fn revenue_over_time(records: &[SalesRecord]) -> Vec<TimePoint> {
    let mut daily = BTreeMap::new();
    for record in records {
        *daily.entry(record.date).or_insert(0.0) += record.revenue;
    }
    daily
        .into_iter()
        .map(|(date, revenue)| TimePoint { date, revenue })
        .collect()
}

fn top_products(records: &[SalesRecord]) -> Vec<ProductRevenue> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.product.clone()).or_insert(0.0) += record.revenue;
    }
    let mut bars: Vec<ProductRevenue> = totals
        .into_iter()
        .map(|(product, revenue)| ProductRevenue { product, revenue })
        .collect();
    // Descending by revenue; the BTreeMap already fixed the tie order by name
    bars.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    bars
}

fn region_product_heatmap(records: &[SalesRecord]) -> Heatmap {
    let regions: BTreeSet<String> = records.iter().map(|r| r.region.clone()).collect();
    let products: BTreeSet<String> = records.iter().map(|r| r.product.clone()).collect();

    let mut cells: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in records {
        *cells
            .entry((record.region.as_str(), record.product.as_str()))
            .or_insert(0.0) += record.revenue;
    }

    let values = regions
        .iter()
        .map(|region| {
            products
                .iter()
                .map(|product| {
                    cells
                        .get(&(region.as_str(), product.as_str()))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    Heatmap {
        regions: regions.into_iter().collect(),
        products: products.into_iter().collect(),
        values,
    }
}

fn monthly_trend(records: &[SalesRecord]) -> Vec<MonthPoint> {
    let mut months: BTreeMap<String, (f64, i64)> = BTreeMap::new();
    for record in records {
        let entry = months.entry(record.month_key()).or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.units_sold;
    }
    months
        .into_iter()
        .map(|(month, (revenue, units_sold))| MonthPoint {
            month,
            revenue,
            units_sold,
        })
        .collect()
}

fn correlation_matrix(records: &[SalesRecord]) -> CorrelationMatrix {
    let units: Vec<f64> = records.iter().map(|r| r.units_sold as f64).collect();
    let revenue: Vec<f64> = records.iter().map(|r| r.revenue).collect();

    let diagonal = |xs: &[f64]| pearson(xs, xs);
    let cross = pearson(&units, &revenue);

    CorrelationMatrix {
        columns: vec!["units_sold".to_string(), "revenue".to_string()],
        values: vec![
            vec![diagonal(&units), cross],
            vec![cross, diagonal(&revenue)],
        ],
    }
}

/// Pearson correlation coefficient; None when undefined
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }

    let mean_x: f64 = xs.iter().sum::<f64>() / n as f64;
    let mean_y: f64 = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

// =============================================================================
// Dynamic chart
// =============================================================================

/// Categorical axis choices for the dynamic chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartAxis {
    Date,
    Month,
    Product,
    Region,
}

/// Numeric measure choices for the dynamic chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMeasure {
    UnitsSold,
    Revenue,
}

/// One bar of a dynamic chart
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Group by the chosen axis and sum the chosen measure, sorted by label
pub fn dynamic_chart(records: &[SalesRecord], x: ChartAxis, y: ChartMeasure) -> Vec<ChartPoint> {
    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let label = match x {
            ChartAxis::Date => record.date.to_string(),
            ChartAxis::Month => record.month_key(),
            ChartAxis::Product => record.product.clone(),
            ChartAxis::Region => record.region.clone(),
        };
        let value = match y {
            ChartMeasure::UnitsSold => record.units_sold as f64,
            ChartMeasure::Revenue => record.revenue,
        };
        *groups.entry(label).or_insert(0.0) += value;
    }
    groups
        .into_iter()
        .map(|(label, value)| ChartPoint { label, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, product: &str, region: &str, units: i64, revenue: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            product: product.to_string(),
            region: region.to_string(),
            units_sold: units,
            revenue,
        }
    }

    fn fixture() -> Vec<SalesRecord> {
        vec![
            record("2024-06-01", "Widget A", "East", 10, 100.0),
            record("2024-06-01", "Widget B", "East", 5, 80.0),
            record("2024-06-02", "Widget A", "West", 2, 20.0),
            record("2024-07-03", "Widget B", "West", 4, 64.0),
        ]
    }

    #[test]
    fn test_kpis() {
        let dashboard = build_dashboard(&fixture());

        assert_eq!(dashboard.kpis.total_revenue, 264.0);
        assert_eq!(dashboard.kpis.total_units, 21);
        assert_eq!(dashboard.kpis.record_count, 4);
    }

    #[test]
    fn test_revenue_over_time_groups_by_day_in_order() {
        let series = revenue_over_time(&fixture());

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date.to_string(), "2024-06-01");
        assert_eq!(series[0].revenue, 180.0);
        assert_eq!(series[2].date.to_string(), "2024-07-03");
    }

    #[test]
    fn test_top_products_sorted_descending() {
        let bars = top_products(&fixture());

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].product, "Widget B");
        assert_eq!(bars[0].revenue, 144.0);
        assert_eq!(bars[1].revenue, 120.0);
    }

    #[test]
    fn test_heatmap_fills_absent_cells_with_zero() {
        let heatmap = region_product_heatmap(&fixture());

        assert_eq!(heatmap.regions, vec!["East", "West"]);
        assert_eq!(heatmap.products, vec!["Widget A", "Widget B"]);
        // East x Widget B
        assert_eq!(heatmap.values[0][1], 80.0);
        // East has no zero cells, West has both filled too; drop one row to check fill
        let sparse = region_product_heatmap(&fixture()[..2]);
        assert_eq!(sparse.regions, vec!["East"]);
        assert_eq!(sparse.values[0], vec![100.0, 80.0]);
    }

    #[test]
    fn test_monthly_trend() {
        let months = monthly_trend(&fixture());

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-06");
        assert_eq!(months[0].revenue, 200.0);
        assert_eq!(months[0].units_sold, 17);
        assert_eq!(months[1].month, "2024-07");
    }

    #[test]
    fn test_correlation_of_proportional_columns_is_one() {
        // revenue = 16 * units everywhere
        let rows = vec![
            record("2024-06-01", "A", "East", 1, 16.0),
            record("2024-06-02", "A", "East", 2, 32.0),
            record("2024-06-03", "A", "East", 5, 80.0),
        ];
        let matrix = correlation_matrix(&rows);

        let r = matrix.values[0][1].unwrap();
        assert!((r - 1.0).abs() < 1e-9, "r = {}", r);
        let diag = matrix.values[0][0].unwrap();
        assert!((diag - 1.0).abs() < 1e-9, "diag = {}", diag);
    }

    #[test]
    fn test_correlation_undefined_for_degenerate_data() {
        // Single row
        let one = vec![record("2024-06-01", "A", "East", 1, 16.0)];
        assert_eq!(correlation_matrix(&one).values[0][1], None);

        // Zero variance in units_sold
        let flat = vec![
            record("2024-06-01", "A", "East", 3, 10.0),
            record("2024-06-02", "A", "East", 3, 20.0),
        ];
        assert_eq!(correlation_matrix(&flat).values[0][1], None);

        // Empty
        assert_eq!(correlation_matrix(&[]).values[0][0], None);
    }

    #[test]
    fn test_empty_subset_builds_empty_dashboard() {
        let dashboard = build_dashboard(&[]);

        assert_eq!(dashboard.kpis.record_count, 0);
        assert_eq!(dashboard.kpis.total_revenue, 0.0);
        assert!(dashboard.revenue_over_time.is_empty());
        assert!(dashboard.top_products.is_empty());
        assert!(dashboard.region_product_heatmap.regions.is_empty());
        assert!(dashboard.monthly_trend.is_empty());
    }

    #[test]
    fn test_dynamic_chart_by_region() {
        let points = dynamic_chart(&fixture(), ChartAxis::Region, ChartMeasure::UnitsSold);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "East");
        assert_eq!(points[0].value, 15.0);
        assert_eq!(points[1].label, "West");
        assert_eq!(points[1].value, 6.0);
    }

    #[test]
    fn test_dynamic_chart_by_month_revenue() {
        let points = dynamic_chart(&fixture(), ChartAxis::Month, ChartMeasure::Revenue);

        assert_eq!(points[0].label, "2024-06");
        assert_eq!(points[0].value, 200.0);
    }
}

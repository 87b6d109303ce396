use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::auth::AuthSession;
use crate::error::Result;
use crate::filter::SalesFilter;
use crate::ingest::write_sales_csv;
use crate::routes::sales::fetch_all_sales;
use crate::AppState;

/// Download the current filtered view as a CSV attachment
///
/// The output carries the canonical header and re-uploads cleanly.
pub async fn export_sales(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(filter): Query<SalesFilter>,
) -> Result<impl IntoResponse> {
    let filename = if filter.is_unconstrained() {
        "sales_data.csv"
    } else {
        "filtered_sales.csv"
    };

    let records = filter.apply(fetch_all_sales(&state.pool).await?);
    let csv_text = write_sales_csv(&records)?;

    tracing::info!("Exported {} rows as {}", records.len(), filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv_text,
    ))
}

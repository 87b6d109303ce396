use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::auth::AuthSession;
use crate::error::Result;
use crate::filter::SalesFilter;
use crate::models::SalesRecord;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SalesListResponse {
    pub count: usize,
    pub records: Vec<SalesRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub success: bool,
    pub rows_deleted: u64,
}

/// Load every stored sales row in upload order.
/// Filtering happens over this set; the table carries no indexes.
pub(crate) async fn fetch_all_sales(pool: &SqlitePool) -> Result<Vec<SalesRecord>> {
    let records = sqlx::query_as::<_, SalesRecord>(
        "SELECT date, product, region, units_sold, revenue FROM sales ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// List stored sales rows, narrowed by the optional filter parameters
pub async fn list_sales(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(filter): Query<SalesFilter>,
) -> Result<Json<SalesListResponse>> {
    let records = filter.apply(fetch_all_sales(&state.pool).await?);

    Ok(Json(SalesListResponse {
        count: records.len(),
        records,
    }))
}

/// Delete every sales row. Users are untouched.
pub async fn clear_sales(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<ClearResponse>> {
    let result = sqlx::query("DELETE FROM sales").execute(&state.pool).await?;
    let rows_deleted = result.rows_affected();

    tracing::info!(
        "Sales table cleared by {}: {} rows deleted",
        session.username,
        rows_deleted
    );

    Ok(Json(ClearResponse {
        success: true,
        rows_deleted,
    }))
}

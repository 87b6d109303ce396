use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthSession;
use crate::charts::{self, ChartAxis, ChartMeasure, ChartPoint, Dashboard};
use crate::error::Result;
use crate::filter::SalesFilter;
use crate::routes::sales::fetch_all_sales;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub x: ChartAxis,
    pub y: ChartMeasure,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub x: ChartAxis,
    pub y: ChartMeasure,
    pub points: Vec<ChartPoint>,
}

/// Build every dashboard block for the current filtered view
pub async fn get_dashboard(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(filter): Query<SalesFilter>,
) -> Result<Json<Dashboard>> {
    let records = filter.apply(fetch_all_sales(&state.pool).await?);

    Ok(Json(charts::build_dashboard(&records)))
}

/// Dynamic chart: caller-selected axis and measure over the filtered view.
/// Unknown `x`/`y` values are rejected by deserialization with a 400.
pub async fn dashboard_chart(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(params): Query<ChartParams>,
    Query(filter): Query<SalesFilter>,
) -> Result<Json<ChartResponse>> {
    let records = filter.apply(fetch_all_sales(&state.pool).await?);

    Ok(Json(ChartResponse {
        x: params.x,
        y: params.y,
        points: charts::dynamic_chart(&records, params.x, params.y),
    }))
}

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Json,
};
use serde::Serialize;

use crate::auth::AuthSession;
use crate::constants::ERR_MISSING_FILE_FIELD;
use crate::error::{AppError, Result};
use crate::ingest::parse_sales_csv;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub rows_inserted: usize,
}

/// Upload a CSV of sales rows
///
/// Accepts either a multipart form with a `file` field or a raw CSV body.
/// The document is validated and coerced in full before anything is
/// written; rows are then inserted inside a single transaction, so a
/// rejected upload never leaves a partial write.
pub async fn upload_sales(
    State(state): State<AppState>,
    _session: AuthSession,
    request: Request,
) -> Result<Json<UploadResponse>> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = if content_type.starts_with("multipart/form-data") {
        read_multipart_file(request).await?
    } else {
        axum::body::to_bytes(request.into_body(), state.config.max_upload_bytes)
            .await
            .map_err(|_| AppError::PayloadTooLarge)?
            .to_vec()
    };

    if bytes.len() > state.config.max_upload_bytes {
        tracing::warn!(
            "Upload rejected: {} bytes (max: {})",
            bytes.len(),
            state.config.max_upload_bytes
        );
        return Err(AppError::PayloadTooLarge);
    }

    // Tolerate non-UTF-8 exports from spreadsheet tools
    let text = String::from_utf8_lossy(&bytes);
    let records = parse_sales_csv(&text)?;

    let mut tx = state.pool.begin().await?;
    for record in &records {
        sqlx::query(
            "INSERT INTO sales (date, product, region, units_sold, revenue) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.date)
        .bind(&record.product)
        .bind(&record.region)
        .bind(record.units_sold)
        .bind(record.revenue)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!("Upload stored: {} rows", records.len());

    Ok(Json(UploadResponse {
        success: true,
        rows_inserted: records.len(),
    }))
}

/// Pull the first `file` field out of a multipart upload
async fn read_multipart_file(request: Request) -> Result<Vec<u8>> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::InvalidUpload(format!("Malformed multipart upload: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("Malformed multipart upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidUpload(format!("Malformed multipart upload: {}", e)))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(AppError::InvalidUpload(ERR_MISSING_FILE_FIELD.to_string()))
}

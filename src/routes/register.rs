use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_EMPTY_PASSWORD, ERR_INVALID_USERNAME};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::hash_password;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
}

/// Register a new user
///
/// Stores the username with a digest of the password. Usernames are unique;
/// a duplicate registration returns 409 Conflict and leaves the existing
/// account untouched.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if !User::validate_username(&payload.username) {
        tracing::warn!("Rejected registration with invalid username");
        return Err(AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()));
    }

    if payload.password.is_empty() {
        return Err(AppError::InvalidInput(ERR_EMPTY_PASSWORD.to_string()));
    }

    let existing = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&state.pool)
        .await?;

    if existing.is_some() {
        tracing::info!("Registration rejected, username taken: {}", payload.username);
        return Err(AppError::UsernameTaken);
    }

    let password_hash = hash_password(&payload.password);

    let insert = sqlx::query("INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(&payload.username)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&state.pool)
        .await;

    match insert {
        Ok(_) => {}
        // The UNIQUE constraint backstops the existence check above
        Err(sqlx::Error::Database(e)) if e.message().contains("UNIQUE") => {
            return Err(AppError::UsernameTaken);
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!("New user registered: {}", payload.username);

    Ok(Json(RegisterResponse { success: true }))
}

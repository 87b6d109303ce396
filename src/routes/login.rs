use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthSession;
use crate::error::{AppError, Result};
use crate::models::{Session, User};
use crate::security::{generate_session_token, verify_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Log in with username and password
///
/// On success issues an opaque bearer token for the session store. Both an
/// unknown username and a wrong password produce the same generic error.
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(&payload.username)
    .fetch_optional(&state.pool)
    .await?;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!("Login attempt for unknown username");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!("Failed login for user: {}", user.username);
        return Err(AppError::InvalidCredentials);
    }

    let now = Utc::now().timestamp();
    let session = Session::new(&user.username, now, state.config.session_ttl_secs);
    let expires_at = DateTime::from_timestamp(session.expires_at, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc3339();

    let token = generate_session_token();
    state.sessions.insert(token.clone(), session);

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(LoginResponse { token, expires_at }))
}

/// Drop the current session
pub async fn logout_user(
    State(state): State<AppState>,
    session: AuthSession,
) -> Json<LogoutResponse> {
    state.sessions.remove(&session.token);
    tracing::info!("User logged out: {}", session.username);

    Json(LogoutResponse { success: true })
}

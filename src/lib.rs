//! Retail Sales Dashboard Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod auth;
pub mod charts;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use db::create_pool;
pub use error::{AppError, Result};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

use auth::SessionStore;
use constants::UPLOAD_BODY_OVERHEAD_BYTES;
use routes::{
    clear_sales, dashboard_chart, export_sales, get_dashboard, health_check, list_sales,
    login_user, logout_user, register_user, upload_sales,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            config,
            sessions: SessionStore::new(),
        }
    }
}

/// Build the application router. Shared by main and the integration tests
/// so both serve exactly the same routes.
pub fn app(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(UPLOAD_BODY_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(register_user))
        .route("/api/login", post(login_user))
        .route("/api/logout", post(logout_user))
        .route("/api/sales/upload", post(upload_sales))
        .route("/api/sales", get(list_sales).delete(clear_sales))
        .route("/api/sales/export", get(export_sales))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/chart", get(dashboard_chart))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::AppError;
use crate::models::Session;
use crate::AppState;

/// In-memory session store shared across handlers.
///
/// Tokens map to sessions; expired entries are dropped lazily on lookup.
/// Lock scope never spans an await point.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under its token
    pub fn insert(&self, token: String, session: Session) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token, session);
    }

    /// Look up a live session, dropping it if expired.
    /// Returns the username the token belongs to.
    pub fn validate(&self, token: &str) -> Option<String> {
        let now = Utc::now().timestamp();
        let mut sessions = self.inner.write().expect("session store lock poisoned");

        match sessions.get(token) {
            Some(session) if !session.is_expired(now) => Some(session.username.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Drop a session (logout). Unknown tokens are a no-op.
    pub fn remove(&self, token: &str) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }

    /// Number of live entries, counting not-yet-collected expired sessions
    pub fn len(&self) -> usize {
        self.inner.read().expect("session store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extractor for the authenticated session on protected routes.
/// Usage in handlers: `async fn handler(session: AuthSession) -> ...`
pub struct AuthSession {
    pub token: String,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let username = state
            .sessions
            .validate(token)
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthSession {
            token: token.to_string(),
            username,
        })
    }
}

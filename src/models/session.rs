/// In-memory login session. Sessions are never persisted; the database holds
/// exactly the sales and users tables.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    /// Unix timestamp after which the session is rejected
    pub expires_at: i64,
}

impl Session {
    /// Create a session for `username` expiring `ttl_secs` from `now`
    pub fn new(username: &str, now: i64, ttl_secs: i64) -> Self {
        Self {
            username: username.to_string(),
            expires_at: now + ttl_secs,
        }
    }

    /// Whether the session has expired as of `now`
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

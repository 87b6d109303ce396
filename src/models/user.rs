use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_USERNAME_LEN;

/// User record stored in the users table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    /// Hex-encoded digest of the password; never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Validate a username: 1-64 characters of letters, digits, '.', '_', '-'
    pub fn validate_username(username: &str) -> bool {
        !username.is_empty()
            && username.len() <= MAX_USERNAME_LEN
            && username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(User::validate_username("alice"));
        assert!(User::validate_username("bob_smith-2.0"));

        // Empty
        assert!(!User::validate_username(""));

        // Too long
        let long = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(!User::validate_username(&long));

        // Exactly at the limit
        let at_limit = "a".repeat(MAX_USERNAME_LEN);
        assert!(User::validate_username(&at_limit));

        // Whitespace and control characters
        assert!(!User::validate_username("alice smith"));
        assert!(!User::validate_username("alice\n"));

        // Non-ASCII
        assert!(!User::validate_username("café"));
    }
}

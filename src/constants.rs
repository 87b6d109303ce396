/// Columns every uploaded CSV must carry, in canonical export order.
/// Header matching is case-insensitive and ignores surrounding whitespace.
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "product", "region", "units_sold", "revenue"];

/// Default maximum upload size in bytes (5MB)
/// A year of daily per-product rows is well under 1MB; this leaves headroom.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5_242_880;

/// Extra request-body allowance on top of the upload limit, covering
/// multipart boundaries and part headers.
pub const UPLOAD_BODY_OVERHEAD_BYTES: usize = 4_096;

/// Default session lifetime in seconds (24 hours)
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

/// Maximum accepted username length
pub const MAX_USERNAME_LEN: usize = 64;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a failed login; deliberately does not reveal whether
/// the username exists.
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Error message for a registration against a taken username
pub const ERR_USERNAME_TAKEN: &str = "Username already exists";

/// Error message for usernames failing format validation
pub const ERR_INVALID_USERNAME: &str =
    "Username must be 1-64 characters of letters, digits, '.', '_' or '-'";

/// Error message for an empty password at registration
pub const ERR_EMPTY_PASSWORD: &str = "Password must not be empty";

/// Error message for an upload without a usable CSV payload
pub const ERR_MISSING_FILE_FIELD: &str = "Upload must contain a 'file' field";

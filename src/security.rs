use rand::RngCore;
use sha2::{Digest, Sha256};

/// Digest a password for storage.
///
/// Plain SHA-256, hex-encoded. Credential hardening (salting, KDFs, rate
/// limiting) is out of scope for this service; the gate only has to keep
/// the dashboard behind a login.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a submitted password against a stored digest
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

/// Generate an opaque session token (256 bits, hex-encoded)
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

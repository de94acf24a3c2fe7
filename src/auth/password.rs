//! bcrypt password hashes
//!
//! The stored form is the standard `$2b$<cost>$<salt+digest>` string, so the
//! salt and work factor travel with each hash.

use crate::core::error::Result;

/// Hash a password with a fresh salt at the given work factor
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// False for a wrong password or a malformed stored hash
pub fn verify_password(password: &str, stored: &str) -> bool {
    match bcrypt::verify(password, stored) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be read");
            false
        }
    }
}

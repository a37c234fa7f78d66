//! Account credential hashing.
//!
//! `accounts.password_hash` holds a PHC string (`$argon2id$v=19$...`) so the
//! salt and cost parameters travel with each row. Plaintext never reaches
//! the database or the logs.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::StorageError;

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash a new account password for storage.
pub fn hash_password(password: &str) -> Result<String, StorageError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StorageError::Auth(format!("Could not hash account password: {e}")))
}

/// Check a login attempt against an account's stored hash.
///
/// A wrong password is `Ok(false)`. An unparseable stored value is an error:
/// the row is corrupt, not the caller's input.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, StorageError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| StorageError::Auth(format!("Stored password hash is corrupt: {e}")))?;

    // Parameters come from the PHC string, so older cost settings still verify.
    Ok(hasher()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

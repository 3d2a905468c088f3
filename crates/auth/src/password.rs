//! Password hashing and verification utilities using Argon2id.
//!
//! Hashes are stored in PHC string format, so parameters travel with the
//! hash and can be tightened later without invalidating existing rows.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,
}

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Arguments
///
/// * `password` - The password to hash
///
/// # Returns
///
/// A `Result` containing the PHC-format hash as a `SecretString` or an error.
///
/// # Example
///
/// ```
/// use auth::password::hash_password;
/// use auth::secrecy::SecretString;
///
/// let password = SecretString::from("my_secure_password".to_string());
/// let hash = hash_password(&password).unwrap();
/// ```
pub fn hash_password(password: &SecretString) -> Result<SecretString, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(SecretString::from(hash.to_string()))
}

/// Verifies a password against a stored PHC-format hash.
///
/// # Arguments
///
/// * `password` - The password to verify
/// * `expected_hash` - The stored hash to verify against
///
/// # Errors
///
/// `InvalidHashFormat` when the stored value is not a PHC string,
/// `VerificationFailed` when the password does not match.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(expected_hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = SecretString::from("correct horse battery staple".to_string());
        let hash = hash_password(&password).unwrap();

        verify_password(&password, hash.expose_secret()).expect("password should verify");
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let password = SecretString::from("right password".to_string());
        let hash = hash_password(&password).unwrap();

        let wrong = SecretString::from("wrong password".to_string());
        assert!(matches!(
            verify_password(&wrong, hash.expose_secret()),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let password = SecretString::from("anything".to_string());
        assert!(matches!(
            verify_password(&password, "not-a-phc-string"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = SecretString::from("same input".to_string());
        let a = hash_password(&password).unwrap();
        let b = hash_password(&password).unwrap();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }
}

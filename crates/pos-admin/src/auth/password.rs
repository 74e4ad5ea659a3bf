//! Argon2 hashing and verification for operator passwords.

use super::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, error, instrument};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hashes a plain-text password with a fresh random salt.
#[instrument(skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }

    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => {
            debug!("Password hashed");
            Ok(hash.to_string())
        }
        Err(e) => {
            error!(error = %e, "Argon2 hashing failed");
            Err(AuthError::PasswordHash(e.to_string()))
        }
    }
}

/// Checks `password` against a stored PHC string.
///
/// Returns `Ok(false)` for a wrong password and an error only when the
/// stored hash cannot be parsed.
#[instrument(skip(stored, password), err(Display))]
pub fn verify_password(stored: &str, password: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "Stored hash is malformed");
        AuthError::PasswordHash(e.to_string())
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "wrong horse").unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_password_rejected() {
        assert_eq!(
            hash_password("12345"),
            Err(AuthError::WeakPassword { min: 6 })
        );
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("not-a-hash", "whatever"),
            Err(AuthError::PasswordHash(_))
        ));
    }
}

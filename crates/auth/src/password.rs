//! Salted password hashing using Argon2id.
//!
//! The salt is stored next to the hash. Verification recomputes the hash with
//! the stored salt in constant time through `PasswordVerifier`.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

/// Fresh random salt, base64 encoded.
pub fn generate_salt() -> String {
    SaltString::generate(&mut OsRng).as_str().to_owned()
}

/// Hash `password` with the given stored salt (PHC string output).
pub fn hash_password(password: &str, salt: &str) -> Result<String, AuthError> {
    let salt =
        SaltString::from_b64(salt).map_err(|e| AuthError::Crypto(format!("invalid salt: {e}")))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("hash error: {e}")))
}

/// Returns `Ok(false)` on mismatch, including a hash that was not produced
/// with `salt`, and `Err` when the stored salt or hash is malformed.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> Result<bool, AuthError> {
    SaltString::from_b64(salt).map_err(|e| AuthError::Crypto(format!("invalid salt: {e}")))?;
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    if parsed.salt.map(|s| s.as_str()) != Some(salt) {
        return Ok(false);
    }

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt).unwrap();
        assert!(verify_password("hunter2", &salt, &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt).unwrap();
        assert!(!verify_password("wrong", &salt, &hash).unwrap());
    }

    #[test]
    fn hash_is_deterministic_for_a_salt() {
        let salt = generate_salt();
        assert_eq!(
            hash_password("p", &salt).unwrap(),
            hash_password("p", &salt).unwrap()
        );
    }

    #[test]
    fn different_salts_give_different_hashes() {
        let a = hash_password("p", &generate_salt()).unwrap();
        let b = hash_password("p", &generate_salt()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_salt_returns_error() {
        let result = hash_password("pw", "!");
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }

    #[test]
    fn hash_under_another_salt_does_not_match() {
        let hash = hash_password("hunter2", &generate_salt()).unwrap();
        assert!(!verify_password("hunter2", &generate_salt(), &hash).unwrap());
    }

    #[test]
    fn malformed_stored_hash_returns_error() {
        let result = verify_password("pw", &generate_salt(), "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }
}

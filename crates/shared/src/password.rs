//! Account password hashing.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`).
//! Verification reads the cost parameters back out of the stored string, so
//! raising the costs here only affects accounts registered afterwards.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// 19 MiB, two passes, one lane, 32-byte output.
const MEMORY_KIB: u32 = 19 * 1024;
const PASSES: u32 = 2;
const LANES: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Hashed in place of a missing account so that unknown emails cost the
/// same time at login as wrong passwords.
const DUMMY_PASSWORD: &str = "tripshare-no-such-account";

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_KIB, PASSES, LANES, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("invalid Argon2 parameters: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC hash. A mismatch is `Ok(false)`;
/// only unreadable hashes and internal failures are errors.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHashFormat)?;

    match hasher()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Login check for an account that may not exist.
///
/// With no stored hash the password is still run through Argon2 against a
/// throwaway hash, and the result is always `false`.
pub fn verify_account_password(password: &str, stored: Option<&str>) -> Result<bool, PasswordError> {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            let dummy = DUMMY_HASH.get_or_init(|| hash_password(DUMMY_PASSWORD).ok());
            if let Some(dummy) = dummy {
                verify_password(password, dummy)?;
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_uses_argon2id_parameters() {
        let hash = hash_password("praia-do-norte").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_same_password_gets_new_salt() {
        let first = hash_password("same_password").unwrap();
        let second = hash_password("same_password").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same_password", &first).unwrap());
        assert!(verify_password("same_password", &second).unwrap());
    }

    #[test]
    fn test_wrong_password_is_false_not_error() {
        let hash = hash_password("correct_password").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_unreadable_hash_is_error() {
        let result = verify_password("password", "plaintext-in-db");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_verify_random_passwords() {
        use fake::faker::internet::en::Password;
        use fake::Fake;

        for _ in 0..3 {
            let password: String = Password(8..32).fake();
            let hash = hash_password(&password).unwrap();
            assert!(verify_password(&password, &hash).unwrap());
        }
    }

    #[test]
    fn test_unicode_passwords_are_not_normalized() {
        let hash = hash_password("senha-viagem-ção").unwrap();
        assert!(verify_password("senha-viagem-ção", &hash).unwrap());
        assert!(!verify_password("senha-viagem-cao", &hash).unwrap());
    }

    #[test]
    fn test_missing_account_never_verifies() {
        assert!(!verify_account_password(DUMMY_PASSWORD, None).unwrap());
        assert!(!verify_account_password("anything", None).unwrap());
    }

    #[test]
    fn test_existing_account_verifies_normally() {
        let hash = hash_password("roadtrip-2025").unwrap();
        assert!(verify_account_password("roadtrip-2025", Some(&hash)).unwrap());
        assert!(!verify_account_password("roadtrip-2024", Some(&hash)).unwrap());
    }
}

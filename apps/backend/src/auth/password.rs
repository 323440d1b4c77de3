//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings, so parameters and salt travel with the
//! hash. Both operations are CPU-bound; async callers run them through
//! `actix_web::web::block`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
};
use tracing::error;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Verified against when the account does not exist, so an unknown email
/// costs the same as a wrong password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$3Dz3Bq0pCzGvqyzDDO8cJ5yNUMJbWdzvkuWOi2nfGCQ";

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// OWASP parameters: 19 MiB memory, 2 passes, 1 lane.
    pub fn new() -> Result<Self, AppError> {
        let params = Params::new(19456, 2, 1, None).map_err(|e| {
            error!(error = %e, "invalid argon2 parameters");
            AppError::config("invalid password hashing configuration")
        })?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!(error = %e, "password hashing failed");
                AppError::internal(ErrorCode::InternalError, "password hashing failed")
            })
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| {
            error!(error = %e, "stored password hash is malformed");
            AppError::internal(ErrorCode::InternalError, "stored password hash is malformed")
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(ArgonError::Password) => Ok(false),
            Err(e) => {
                error!(error = %e, "password verification failed");
                Err(AppError::internal(
                    ErrorCode::InternalError,
                    "password verification failed",
                ))
            }
        }
    }

    /// Burn the same work as a real verification and discard the result.
    pub fn verify_dummy(&self, password: &str) {
        if let Ok(parsed) = PasswordHash::new(DUMMY_HASH) {
            let _ = self.argon2.verify_password(password.as_bytes(), &parsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new().unwrap();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn salts_are_unique() {
        let hasher = PasswordHasher::new().unwrap();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new().unwrap();
        assert!(hasher.verify("whatever", "plaintext-password").is_err());
    }

    #[test]
    fn dummy_hash_parses() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
    }
}

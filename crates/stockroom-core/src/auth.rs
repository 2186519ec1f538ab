//! # Credential Gate
//!
//! Hashed-credential precondition for mutation surfaces.
//!
//! The ledger itself is auth-agnostic; embedding applications construct a
//! [`Credential`] at setup time and call [`Credential::verify`] before
//! exposing any mutation operation. Passwords are never stored or compared
//! in plaintext: Argon2 with a per-credential random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{CoreError, CoreResult};

/// A username plus an Argon2 password hash.
#[derive(Debug, Clone)]
pub struct Credential {
    username: String,
    password_hash: String,
}

impl Credential {
    /// Creates a credential by hashing `password` with a fresh random salt.
    pub fn new(username: impl Into<String>, password: &str) -> CoreResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CoreError::Credential(e.to_string()))?;

        Ok(Credential {
            username: username.into(),
            password_hash: hash.to_string(),
        })
    }

    /// Restores a credential from a previously stored PHC hash string.
    pub fn from_hash(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Credential {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// The username this credential belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The stored PHC hash string (safe to persist).
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Checks a username/password pair against this credential.
    ///
    /// Returns `false` for a wrong username, a wrong password, or an
    /// unparseable stored hash; never reveals which.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

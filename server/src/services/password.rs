//! Password hashing and verification with Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=...,t=...,p=...$...`),
//! so verification always uses the parameters embedded in the stored hash.
//! [`Passwords`] also keeps a dummy hash: login verifies against it when the
//! email is unknown so both failure paths cost the same.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("invalid password hash: {0}")]
    MalformedHash(argon2::password_hash::Error),
}

pub struct Passwords {
    params: Params,
    dummy_hash: String,
}

impl Passwords {
    /// Build a hasher with the given Argon2id cost parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the dummy hash cannot be computed.
    pub fn new(params: Params) -> Result<Self, PasswordError> {
        let dummy_hash = hash_with(&params, DUMMY_PASSWORD)?;
        Ok(Self { params, dummy_hash })
    }

    /// Hasher using the crate's default (memory-hard) Argon2id parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the dummy hash cannot be computed.
    pub fn with_defaults() -> Result<Self, PasswordError> {
        Self::new(Params::default())
    }

    /// Cheapest valid parameters, for tests only.
    #[cfg(test)]
    #[must_use]
    pub fn fast() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .expect("minimum argon2 params are valid");
        Self::new(params).expect("dummy hash should compute")
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(&self.params, password)
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// Returns an error only when the stored hash cannot be parsed.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// Burn one verification against the dummy hash. Always reports a mismatch.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}

fn hash_with(params: &Params, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;

//! Password hashing with Argon2.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};

use super::CustomerError;

/// Argon2 hash of a customer password in PHC string format.
///
/// The plaintext never outlives construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Minimum accepted plaintext length, in characters.
    pub const MIN_LENGTH: usize = 6;

    /// Validates and hashes a plaintext password.
    pub fn from_plaintext(plaintext: &str) -> Result<Self, CustomerError> {
        if plaintext.chars().count() < Self::MIN_LENGTH {
            return Err(CustomerError::PasswordTooShort);
        }

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|e| CustomerError::PasswordHash(e.to_string()))
    }

    /// Wraps a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Checks a plaintext candidate against the hash.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = password_hash::PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

//! Argon2 password hashing
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) carrying their own salt and
//! parameters, so verification keeps working after the cost is tuned.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{CommonError, CommonResult};

/// Argon2id hasher with configurable cost
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { params: Params::default() }
    }
}

impl PasswordHasher {
    /// Hasher with explicit memory (KiB) and iteration costs.
    pub fn with_cost(memory_kib: u32, iterations: u32) -> CommonResult<Self> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| CommonError::config_field("argon2", e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> CommonResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CommonError::internal(format!("Password hashing failed: {e}")))
    }

    /// Check a password against a stored PHC string.
    ///
    /// A malformed stored hash is an error; a wrong password is `Ok(false)`.
    pub fn verify(&self, password: &str, stored_hash: &str) -> CommonResult<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| CommonError::internal(format!("Stored password hash is invalid: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CommonError::internal(format!("Password verification failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for crypto::password.
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_cost(64, 1).unwrap()
    }

    /// Validates `PasswordHasher::hash` behavior for the verify round
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms the right password verifies and a wrong one does not.
    /// - Confirms two hashes of the same password differ by salt.
    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first).unwrap());
        assert!(!hasher.verify("secret2", &first).unwrap());
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        let stored = cheap().hash("secret1").unwrap();
        assert!(PasswordHasher::default().verify("secret1", &stored).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(cheap().verify("secret1", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(PasswordHasher::with_cost(1, 0).is_err());
    }
}

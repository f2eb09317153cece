//! Password Hashing and Verification
//!
//! Argon2id with a fresh random salt per hash, stored as a PHC string.
//! Verification reads the algorithm parameters back out of the stored
//! hash, so hashes made with older cost settings keep verifying.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Argon2id hasher with fixed cost parameters.
///
/// `Default` uses the OWASP recommendation (m=19456 KiB, t=2, p=1).
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher {
    /// Custom cost: memory in KiB, iterations, parallelism.
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordHashError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a clear-text password. Two calls on the same input differ.
    pub fn hash(&self, password: &str) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }

    /// Check a clear-text password against this hash.
    ///
    /// Comparison is constant-time inside argon2.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_cost(Params::MIN_M_COST, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = cheap().hash("correct horse").unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify("correct horse"));
        assert!(!hashed.verify("wrong horse"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = cheap();
        let a = hasher.hash("same input").unwrap();
        let b = hasher.hash("same input").unwrap();

        assert_ne!(a, b);
        assert!(a.verify("same input"));
        assert!(b.verify("same input"));
    }

    #[test]
    fn test_unicode_password() {
        let hashed = cheap().hash("пароль密码🔐").unwrap();
        assert!(hashed.verify("пароль密码🔐"));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hashed = cheap().hash("roundtrip!").unwrap();
        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();

        assert_eq!(hashed, restored);
        assert!(restored.verify("roundtrip!"));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("not a phc string"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            PasswordHasher::with_cost(1, 1, 1),
            Err(PasswordHashError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let hashed = cheap().hash("secret123").unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("[HASH]"));
        assert!(!debug.contains("argon2id"));
    }
}

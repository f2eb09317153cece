//! Cryptographic Utilities
//!
//! Random material comes from the OS CSPRNG. Remember tokens are exactly
//! [`REMEMBER_TOKEN_BYTES`] random bytes, base64url-encoded with padding.
//! [`KeyedHasher`] is deterministic so a token can be found again by its
//! digest; never use it for passwords (see [`crate::password`]).

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha512;
use thiserror::Error;

/// Number of random bytes behind every remember token.
pub const REMEMBER_TOKEN_BYTES: usize = 64;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// A negative byte count was requested
    #[error("random: out of range ({0})")]
    OutOfRange(i64),

    /// The OS random source failed
    #[error("random source unavailable: {0}")]
    RandomUnavailable(#[from] rand::Error),

    /// Keyed hashing requires a non-empty secret
    #[error("keyed hash secret is empty")]
    EmptyKey,

    /// Token is not valid base64url
    #[error("token is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Generate `n` cryptographically secure random bytes.
///
/// Negative `n` fails with [`CryptoError::OutOfRange`].
pub fn random_bytes(n: i64) -> Result<Vec<u8>, CryptoError> {
    let len = usize::try_from(n).map_err(|_| CryptoError::OutOfRange(n))?;
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// `n_bytes` random bytes, base64url-encoded.
pub fn random_string(n_bytes: i64) -> Result<String, CryptoError> {
    Ok(URL_SAFE.encode(random_bytes(n_bytes)?))
}

/// A new remember token of constant size.
pub fn remember_token() -> Result<String, CryptoError> {
    random_string(REMEMBER_TOKEN_BYTES as i64)
}

/// Number of raw bytes encoded in a base64url token.
pub fn decoded_len(token: &str) -> Result<usize, CryptoError> {
    Ok(URL_SAFE.decode(token)?.len())
}

/// HMAC-SHA512 keyed by the server-wide secret.
///
/// The same input and key always produce the same digest.
#[derive(Clone)]
pub struct KeyedHasher {
    mac: Hmac<Sha512>,
}

impl KeyedHasher {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.is_empty() {
            return Err(CryptoError::EmptyKey);
        }
        let mac = <Hmac<Sha512> as Mac>::new_from_slice(key).map_err(|_| CryptoError::EmptyKey)?;
        Ok(Self { mac })
    }

    /// Digest of `input`, base64url-encoded (88 characters).
    pub fn hash(&self, input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(input.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for KeyedHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedHasher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

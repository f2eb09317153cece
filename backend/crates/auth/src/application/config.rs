//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

use platform::cookie::CookieConfig;
use platform::crypto::KeyedHasher;
use platform::password::PasswordHasher;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::error::{AuthError, AuthResult};

/// Name of the long-lived identity cookie
pub const REMEMBER_COOKIE_NAME: &str = "remember_token";

/// Where the require gate sends anonymous requests
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Server-wide secret for the remember-token keyed hash.
///
/// Can only be built from a non-empty value.
#[derive(Clone)]
pub struct HmacKey(Vec<u8>);

impl HmacKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> AuthResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::EnvironmentUnset);
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HmacKey").field(&"[REDACTED]").finish()
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Keyed-hash secret for remember tokens
    pub hmac_key: HmacKey,
    /// Remember cookie attributes
    pub cookie: CookieConfig,
    /// Redirect target for anonymous requests on protected routes
    pub login_path: String,
    /// Argon2id cost
    pub password_hasher: PasswordHasher,
}

impl AuthConfig {
    pub fn new(hmac_key: HmacKey) -> Self {
        Self {
            hmac_key,
            cookie: CookieConfig {
                name: REMEMBER_COOKIE_NAME.to_string(),
                ..CookieConfig::default()
            },
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            password_hasher: PasswordHasher::default(),
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development(hmac_key: HmacKey) -> Self {
        let mut config = Self::new(hmac_key);
        config.cookie.secure = false;
        config
    }

    /// Read `HMAC_KEY` and `COOKIE_SECURE` from the process environment.
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// A missing or empty `HMAC_KEY` is an error; `COOKIE_SECURE` defaults
    /// to `true` and accepts `false`/`0` to disable.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup("HMAC_KEY").ok_or(AuthError::EnvironmentUnset)?;
        let mut config = Self::new(HmacKey::new(key)?);

        if let Some(secure) = lookup("COOKIE_SECURE") {
            config.cookie.secure = !matches!(secure.trim(), "false" | "0");
        }

        Ok(config)
    }

    pub fn with_password_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.password_hasher = hasher;
        self
    }

    pub fn keyed_hasher(&self) -> AuthResult<KeyedHasher> {
        Ok(KeyedHasher::new(self.hmac_key.as_bytes())?)
    }
}

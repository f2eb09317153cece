//! User Entity
//!
//! `password` and `remember` hold plaintext only while a validation pass is
//! running. The pipeline hashes them into `password_hash` / `remember_hash`
//! and wipes the plaintext, so a persisted or loaded `User` carries hashes
//! only.

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use zeroize::Zeroize;

#[derive(Clone, Default)]
pub struct User {
    /// Assigned by the store on create; `0` until then
    pub id: UserId,
    pub name: String,
    /// Lowercased and trimmed by validation
    pub email: String,
    /// Plaintext password (transient)
    pub password: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Plaintext remember token (transient)
    pub remember: String,
    /// Keyed hash of the remember token
    pub remember_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A not-yet-persisted user as submitted on signup
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    pub fn clear_password(&mut self) {
        self.password.zeroize();
    }

    pub fn clear_remember(&mut self) {
        self.remember.zeroize();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_hash", &"[HASH]")
            .field("remember", &"[REDACTED]")
            .field("remember_hash", &"[HASH]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

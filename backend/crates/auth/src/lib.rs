//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, email rules, repository trait
//! - `application/` - User validator pipeline and sign up/in/out use cases
//! - `infra/` - Postgres and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; plaintext is wiped after hashing
//! - Remember tokens are 64 random bytes; only their HMAC-SHA512 digest
//!   is stored, keyed by a server-wide secret
//! - Sign in and sign out both rotate the remember token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, HmacKey};
pub use application::user_validator::UserValidator;
pub use domain::entity::user::User;
pub use domain::repository::UserRepository;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

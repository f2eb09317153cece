//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer. Lookups return `Ok(None)` for "not found" so that
//! absence stays distinct from every other failure.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and assign its id.
    ///
    /// A duplicate email must fail with `AuthError::EmailTaken`.
    async fn create(&self, user: &mut User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalised) email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Find user by the keyed hash of their remember token
    async fn find_by_remember_hash(&self, remember_hash: &str) -> AuthResult<Option<User>>;

    /// Update user. Fails with `AuthError::UserNotFound` if the id is unknown.
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete user
    async fn delete(&self, id: UserId) -> AuthResult<()>;
}

//! Sign Out Use Case
//!
//! Rotates the user's remember token. Every cookie still holding the old
//! value, on any device, stops identifying the user.

use std::sync::Arc;

use platform::crypto;

use crate::application::user_validator::UserValidator;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R> {
    validator: Arc<UserValidator<R>>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(validator: Arc<UserValidator<R>>) -> Self {
        Self { validator }
    }

    pub async fn execute(&self, mut user: User) -> AuthResult<()> {
        user.remember = crypto::remember_token()?;
        self.validator.update(&mut user).await?;

        tracing::info!(user_id = %user.id, "User signed out");
        Ok(())
    }
}

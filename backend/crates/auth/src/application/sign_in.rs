//! Sign In Use Case
//!
//! Authenticates a user by email and password, then rotates their remember
//! token so the new cookie is the only valid one.

use std::sync::Arc;

use platform::crypto;
use zeroize::Zeroize;

use crate::application::user_validator::UserValidator;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    /// Plaintext token for the remember cookie
    pub remember_token: String,
}

/// Sign in use case
pub struct SignInUseCase<R> {
    validator: Arc<UserValidator<R>>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(validator: Arc<UserValidator<R>>) -> Self {
        Self { validator }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let SignInInput {
            email,
            mut password,
        } = input;

        let authenticated = self.validator.authenticate(&email, &password).await;
        password.zeroize();
        let mut user = authenticated?;

        let remember_token = crypto::remember_token()?;
        user.remember = remember_token.clone();
        self.validator.update(&mut user).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            user,
            remember_token,
        })
    }
}

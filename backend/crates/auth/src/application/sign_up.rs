//! Sign Up Use Case
//!
//! Creates a new user account and hands back the remember token for the
//! cookie.

use std::sync::Arc;

use platform::crypto;

use crate::application::user_validator::UserValidator;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    /// Plaintext token for the remember cookie
    pub remember_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<R> {
    validator: Arc<UserValidator<R>>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(validator: Arc<UserValidator<R>>) -> Self {
        Self { validator }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let remember_token = crypto::remember_token()?;

        let mut user = User::new(input.name, input.email, input.password);
        user.remember = remember_token.clone();

        self.validator.create(&mut user).await?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(SignUpOutput {
            user,
            remember_token,
        })
    }
}

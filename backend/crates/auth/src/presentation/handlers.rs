//! HTTP Handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::application::{
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, UserValidator,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{SignInRequest, SignUpRequest, UserResponse};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub validator: Arc<UserValidator<R>>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    /// Builds the validator. Fails if the keyed-hash secret is unusable.
    pub fn new(repo: R, config: AuthConfig) -> AuthResult<Self> {
        let validator = UserValidator::new(Arc::new(repo), &config)?;
        Ok(Self {
            validator: Arc::new(validator),
            config: Arc::new(config),
        })
    }
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    jar: CookieJar,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.validator.clone());

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = jar.add(state.config.cookie.build(output.remember_token));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    jar: CookieJar,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.validator.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = jar.add(state.config.cookie.build(output.remember_token));

    Ok((StatusCode::OK, jar, Json(UserResponse::from(&output.user))))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /logout
///
/// Clears the cookie and rotates the stored token.
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.validator.clone());
    use_case.execute(user).await?;

    Ok((
        StatusCode::NO_CONTENT,
        jar.add(state.config.cookie.removal()),
    ))
}

// ============================================================================
// Account
// ============================================================================

/// GET /account
pub async fn account(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

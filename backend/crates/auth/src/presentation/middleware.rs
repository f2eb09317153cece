//! Auth Middleware
//!
//! Two stages around every request:
//! - [`identify_user`] runs everywhere and never rejects. A valid remember
//!   cookie attaches a [`CurrentUser`] to the request extensions.
//! - [`require_user`] guards protected routes and redirects anonymous
//!   requests to the login page before the handler runs.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::AuthAppState;

/// The user identified from this request's remember cookie.
///
/// Set once by [`identify_user`]; handlers only read it.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Attach the identity behind the remember cookie, if any.
pub async fn identify_user<R>(
    State(state): State<AuthAppState<R>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    if let Some(token) = state.config.cookie.read(&jar) {
        match state.validator.by_remember(token).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Request identified");
                req.extensions_mut().insert(CurrentUser(user));
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("Remember cookie matched no user");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to identify request");
            }
        }
    }

    next.run(req).await
}

/// Redirect anonymous requests to the login path.
pub async fn require_user(
    State(config): State<Arc<AuthConfig>>,
    req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<CurrentUser>().is_none() {
        return login_redirect(&config);
    }
    next.run(req).await
}

/// `302 Found` to the configured login path.
pub fn login_redirect(config: &AuthConfig) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, config.login_path.clone())],
    )
        .into_response()
}

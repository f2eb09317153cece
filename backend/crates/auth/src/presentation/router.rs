//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_user;

/// Signup, login, logout and account routes.
///
/// Identification is not applied here; the caller layers
/// [`identify_user`](crate::presentation::middleware::identify_user) over
/// the composed application router so every route sees it.
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", post(handlers::sign_out::<R>))
        .route("/account", get(handlers::account))
        .route_layer(middleware::from_fn_with_state(
            state.config.clone(),
            require_user,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::sign_in::<R>))
        .merge(protected)
        .with_state(state)
}

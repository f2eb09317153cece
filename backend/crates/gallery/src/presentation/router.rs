//! Gallery Router

use auth::middleware::require_user;
use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::GalleryRepository;
use crate::presentation::handlers::{self, GalleryAppState};
use crate::presentation::middleware::require_gallery_owner;

/// Gallery and image routes.
///
/// Expects `auth::middleware::identify_user` to be layered over the
/// composed application router.
pub fn gallery_router<R>(state: GalleryAppState<R>) -> Router
where
    R: GalleryRepository + Send + Sync + 'static,
{
    // Layers run bottom-up: require_user, then the ownership gate.
    let owned = Router::new()
        .route("/galleries/{gallery_id}", get(handlers::show::<R>))
        .route(
            "/galleries/{gallery_id}/update",
            post(handlers::update::<R>),
        )
        .route(
            "/galleries/{gallery_id}/delete",
            post(handlers::delete::<R>),
        )
        .route(
            "/galleries/{gallery_id}/images/{filename}/delete",
            post(handlers::delete_image::<R>),
        )
        .route(
            "/images/galleries/{gallery_id}/{filename}",
            get(handlers::serve_image::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_gallery_owner::<R>,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.auth_config.clone(),
            require_user,
        ));

    let signed_in = Router::new()
        .route(
            "/galleries",
            get(handlers::index::<R>).post(handlers::create::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth_config.clone(),
            require_user,
        ));

    Router::new()
        .merge(signed_in)
        .merge(owned)
        .with_state(state)
}

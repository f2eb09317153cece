//! Ownership Gate
//!
//! Runs behind `auth::middleware::require_user` on routes that address a
//! single gallery. The gallery must exist and belong to the identified
//! user; otherwise the response is `404`, never `403`, so non-owners learn
//! nothing about which ids exist.

use std::collections::HashMap;

use auth::middleware::{CurrentUser, login_redirect};
use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::entity::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::GalleryError;
use crate::presentation::handlers::{GalleryAppState, parse_gallery_id};

/// The gallery addressed by the route, verified to belong to the requester.
#[derive(Debug, Clone)]
pub struct OwnedGallery(pub Gallery);

pub async fn require_gallery_owner<R>(
    State(state): State<GalleryAppState<R>>,
    Path(params): Path<HashMap<String, String>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let Some(user_id) = req.extensions().get::<CurrentUser>().map(|c| c.0.id) else {
        return login_redirect(&state.auth_config);
    };

    let raw_id = params.get("gallery_id").map(String::as_str).unwrap_or_default();
    let lookup = match parse_gallery_id(raw_id) {
        Ok(id) => state.validator.by_id(id).await,
        Err(e) => Err(e),
    };

    match lookup {
        Ok(gallery) if gallery.is_owned_by(user_id) => {
            req.extensions_mut().insert(OwnedGallery(gallery));
            next.run(req).await
        }
        Ok(gallery) => {
            tracing::warn!(
                user_id = %user_id,
                gallery_id = %gallery.id,
                "Gallery access by non-owner"
            );
            GalleryError::GalleryNotFound.into_response()
        }
        Err(e) => {
            if !e.is_not_found() && !matches!(e, GalleryError::IdInvalid) {
                tracing::error!(error = %e, "Gallery lookup failed in ownership gate");
            }
            GalleryError::GalleryNotFound.into_response()
        }
    }
}

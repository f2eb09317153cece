//! HTTP Handlers

use std::sync::Arc;

use auth::AuthConfig;
use auth::middleware::CurrentUser;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use kernel::id::GalleryId;

use crate::application::{GalleryConfig, GalleryValidator};
use crate::domain::entity::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};
use crate::infra::images::ImageStore;
use crate::presentation::dto::{GalleryDetailResponse, GalleryRequest, GalleryResponse};
use crate::presentation::middleware::OwnedGallery;

/// Shared state for gallery handlers
pub struct GalleryAppState<R> {
    pub validator: Arc<GalleryValidator<R>>,
    pub images: Arc<ImageStore>,
    /// For the login redirect on protected routes
    pub auth_config: Arc<AuthConfig>,
}

impl<R> GalleryAppState<R>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: &GalleryConfig, auth_config: Arc<AuthConfig>) -> Self {
        Self {
            validator: Arc::new(GalleryValidator::new(Arc::new(repo))),
            images: Arc::new(ImageStore::new(config.image_dir.clone())),
            auth_config,
        }
    }
}

impl<R> Clone for GalleryAppState<R> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
            images: self.images.clone(),
            auth_config: self.auth_config.clone(),
        }
    }
}

/// Route ids that do not parse are indistinguishable from unknown ones.
pub(crate) fn parse_gallery_id(raw: &str) -> GalleryResult<GalleryId> {
    raw.parse::<i64>()
        .map(GalleryId::from_raw)
        .map_err(|_| GalleryError::GalleryNotFound)
}

/// GET /galleries
pub async fn index<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> GalleryResult<Json<Vec<GalleryResponse>>>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let galleries = state.validator.by_owner(user.id).await?;
    Ok(Json(galleries.into_iter().map(Into::into).collect()))
}

/// POST /galleries
pub async fn create<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<GalleryRequest>,
) -> GalleryResult<impl IntoResponse>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let mut gallery = Gallery::new(user.id, req.title);
    state.validator.create(&mut gallery).await?;

    Ok((StatusCode::CREATED, Json(GalleryResponse::from(gallery))))
}

/// GET /galleries/{gallery_id}
pub async fn show<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(OwnedGallery(gallery)): Extension<OwnedGallery>,
) -> GalleryResult<Json<GalleryDetailResponse>>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let images = state.images.list(gallery.id).await?;
    Ok(Json(GalleryDetailResponse::new(gallery, images)))
}

/// POST /galleries/{gallery_id}/update
pub async fn update<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(OwnedGallery(mut gallery)): Extension<OwnedGallery>,
    Json(req): Json<GalleryRequest>,
) -> GalleryResult<Json<GalleryResponse>>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    gallery.title = req.title;
    state.validator.update(&mut gallery).await?;
    Ok(Json(gallery.into()))
}

/// POST /galleries/{gallery_id}/delete
pub async fn delete<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(OwnedGallery(gallery)): Extension<OwnedGallery>,
) -> GalleryResult<StatusCode>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    state.validator.delete(gallery.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /images/galleries/{gallery_id}/{filename}
pub async fn serve_image<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(OwnedGallery(gallery)): Extension<OwnedGallery>,
    Path((_, filename)): Path<(String, String)>,
) -> GalleryResult<impl IntoResponse>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let image = state.images.read(gallery.id, &filename).await?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}

/// POST /galleries/{gallery_id}/images/{filename}/delete
pub async fn delete_image<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(OwnedGallery(gallery)): Extension<OwnedGallery>,
    Path((_, filename)): Path<(String, String)>,
) -> GalleryResult<StatusCode>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    state.images.delete(gallery.id, &filename).await?;
    Ok(StatusCode::NO_CONTENT)
}

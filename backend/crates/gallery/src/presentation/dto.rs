//! API DTOs

use chrono::{DateTime, Utc};
use kernel::id::{GalleryId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Gallery;

/// Create / update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub id: GalleryId,
    pub owner_id: UserId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Gallery> for GalleryResponse {
    fn from(gallery: Gallery) -> Self {
        Self {
            id: gallery.id,
            owner_id: gallery.owner_id,
            title: gallery.title,
            created_at: gallery.created_at,
            updated_at: gallery.updated_at,
        }
    }
}

/// An image in a gallery and where to fetch it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub filename: String,
    pub path: String,
}

impl ImageResponse {
    pub fn new(gallery_id: GalleryId, filename: String) -> Self {
        Self {
            path: format!("/images/galleries/{gallery_id}/{filename}"),
            filename,
        }
    }
}

/// Owner view of a single gallery
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDetailResponse {
    #[serde(flatten)]
    pub gallery: GalleryResponse,
    pub images: Vec<ImageResponse>,
}

impl GalleryDetailResponse {
    pub fn new(gallery: Gallery, filenames: Vec<String>) -> Self {
        let id = gallery.id;
        Self {
            gallery: gallery.into(),
            images: filenames
                .into_iter()
                .map(|name| ImageResponse::new(id, name))
                .collect(),
        }
    }
}

//! Repository Traits

use kernel::id::{GalleryId, UserId};

use crate::domain::entity::Gallery;
use crate::error::GalleryResult;

/// Gallery repository trait
#[trait_variant::make(GalleryRepository: Send)]
pub trait LocalGalleryRepository {
    /// Insert a gallery and assign its id
    async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()>;

    /// Find gallery by ID
    async fn find_by_id(&self, id: GalleryId) -> GalleryResult<Option<Gallery>>;

    /// All galleries of one owner, oldest first
    async fn find_by_owner(&self, owner_id: UserId) -> GalleryResult<Vec<Gallery>>;

    /// Update gallery. Fails with `GalleryNotFound` if the id is unknown.
    async fn update(&self, gallery: &Gallery) -> GalleryResult<()>;

    /// Delete gallery
    async fn delete(&self, id: GalleryId) -> GalleryResult<()>;
}

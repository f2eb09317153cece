//! Gallery Validator
//!
//! Same pipeline engine as users, with a shorter chain: an owner and a
//! title on every write, a positive id on delete and lookup.

use std::sync::Arc;

use kernel::id::{GalleryId, UserId};
use kernel::validation::{self, Rule};

use crate::application::gallery_rules::{ID_POSITIVE, OWNER_REQUIRED, TITLE_REQUIRED};
use crate::domain::entity::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};

pub struct GalleryValidator<R> {
    repo: Arc<R>,
}

impl<R> GalleryValidator<R>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    fn write_chain() -> [&'static dyn Rule<Gallery, GalleryError>; 2] {
        [&OWNER_REQUIRED, &TITLE_REQUIRED]
    }

    pub async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        validation::run(gallery, &Self::write_chain()).await?;
        self.repo.create(gallery).await?;
        tracing::info!(gallery_id = %gallery.id, user_id = %gallery.owner_id, "Gallery created");
        Ok(())
    }

    pub async fn update(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        validation::run(gallery, &Self::write_chain()).await?;
        gallery.touch();
        self.repo.update(gallery).await
    }

    pub async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        Self::require_id(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(gallery_id = %id, "Gallery deleted");
        Ok(())
    }

    pub async fn by_id(&self, id: GalleryId) -> GalleryResult<Gallery> {
        Self::require_id(id).await?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(GalleryError::GalleryNotFound)
    }

    pub async fn by_owner(&self, owner_id: UserId) -> GalleryResult<Vec<Gallery>> {
        let mut candidate = Gallery {
            owner_id,
            ..Default::default()
        };
        let rules: [&dyn Rule<Gallery, GalleryError>; 1] = [&OWNER_REQUIRED];
        validation::run(&mut candidate, &rules).await?;
        self.repo.find_by_owner(owner_id).await
    }

    async fn require_id(id: GalleryId) -> GalleryResult<()> {
        let mut candidate = Gallery {
            id,
            ..Default::default()
        };
        let rules: [&dyn Rule<Gallery, GalleryError>; 1] = [&ID_POSITIVE];
        validation::run(&mut candidate, &rules).await
    }
}

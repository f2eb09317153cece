//! In-Memory Gallery Repository

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{GalleryId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};

#[derive(Default)]
struct Store {
    last_id: i64,
    galleries: BTreeMap<GalleryId, Gallery>,
}

#[derive(Clone, Default)]
pub struct InMemoryGalleryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryGalleryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GalleryRepository for InMemoryGalleryRepository {
    async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        gallery.id = GalleryId::from_raw(store.last_id);
        store.galleries.insert(gallery.id, gallery.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: GalleryId) -> GalleryResult<Option<Gallery>> {
        Ok(self.store.read().await.galleries.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> GalleryResult<Vec<Gallery>> {
        let store = self.store.read().await;
        Ok(store
            .galleries
            .values()
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, gallery: &Gallery) -> GalleryResult<()> {
        let mut store = self.store.write().await;
        match store.galleries.get_mut(&gallery.id) {
            Some(stored) => {
                *stored = gallery.clone();
                Ok(())
            }
            None => Err(GalleryError::GalleryNotFound),
        }
    }

    async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        self.store.write().await.galleries.remove(&id);
        Ok(())
    }
}

//! Gallery Entity

use chrono::{DateTime, Utc};
use kernel::id::{GalleryId, UserId};

/// A titled collection of images owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    /// Assigned by the store on create; `0` until then
    pub id: GalleryId,
    pub owner_id: UserId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gallery {
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            owner_id,
            title: title.into(),
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

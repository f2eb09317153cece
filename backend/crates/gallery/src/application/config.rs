//! Gallery Configuration

use std::path::PathBuf;

/// Default root for uploaded gallery images
pub const DEFAULT_IMAGE_DIR: &str = "images/galleries";

#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Images live under `<image_dir>/<gallery_id>/<filename>`
    pub image_dir: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
        }
    }
}

impl GalleryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("IMAGE_DIR").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => Self {
                image_dir: PathBuf::from(dir),
            },
            None => Self::default(),
        }
    }
}

//! Image Files on Disk
//!
//! Images live at `<root>/<gallery_id>/<filename>`. Only names accepted by
//! [`image::content_type`] are ever listed, read or removed.

use std::io::ErrorKind;
use std::path::PathBuf;

use kernel::id::GalleryId;

use crate::domain::image;
use crate::error::{GalleryError, GalleryResult};

/// A loaded image and its MIME type
#[derive(Debug)]
pub struct Image {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn gallery_dir(&self, gallery_id: GalleryId) -> PathBuf {
        self.root.join(gallery_id.to_string())
    }

    /// Unsafe names and missing files are both `ImageNotFound`.
    pub async fn read(&self, gallery_id: GalleryId, filename: &str) -> GalleryResult<Image> {
        let content_type = image::content_type(filename).ok_or(GalleryError::ImageNotFound)?;
        let path = self.gallery_dir(gallery_id).join(filename);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Image {
                content_type,
                bytes,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(GalleryError::ImageNotFound),
            Err(e) => Err(GalleryError::Io(e)),
        }
    }

    /// Image file names in a gallery, sorted. A gallery without a
    /// directory has no images.
    pub async fn list(&self, gallery_id: GalleryId) -> GalleryResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(self.gallery_dir(gallery_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(GalleryError::Io(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if image::content_type(&name).is_some() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub async fn delete(&self, gallery_id: GalleryId, filename: &str) -> GalleryResult<()> {
        image::content_type(filename).ok_or(GalleryError::ImageNotFound)?;
        let path = self.gallery_dir(gallery_id).join(filename);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(gallery_id = %gallery_id, filename, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(GalleryError::ImageNotFound),
            Err(e) => Err(GalleryError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use platform::crypto;

    use super::*;

    struct TempRoot(PathBuf);

    impl TempRoot {
        async fn new() -> Self {
            let dir = std::env::temp_dir().join(format!(
                "image-store-{}",
                crypto::random_string(12).unwrap()
            ));
            tokio::fs::create_dir_all(&dir).await.unwrap();
            Self(dir)
        }

        async fn write(&self, gallery_id: GalleryId, name: &str) {
            let dir = self.0.join(gallery_id.to_string());
            tokio::fs::create_dir_all(&dir).await.unwrap();
            tokio::fs::write(dir.join(name), name.as_bytes()).await.unwrap();
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn test_list_keeps_only_images() {
        let root = TempRoot::new().await;
        let store = ImageStore::new(root.0.clone());
        let id = GalleryId::from_raw(7);
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.jpeg", "README"] {
            root.write(id, name).await;
        }
        tokio::fs::create_dir_all(store.gallery_dir(id).join("nested.png"))
            .await
            .unwrap();

        assert_eq!(store.list(id).await.unwrap(), ["a.jpg", "b.PNG", "c.jpeg"]);
    }

    #[tokio::test]
    async fn test_list_without_directory_is_empty() {
        let root = TempRoot::new().await;
        let store = ImageStore::new(root.0.clone());

        assert!(store.list(GalleryId::from_raw(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_image_once() {
        let root = TempRoot::new().await;
        let store = ImageStore::new(root.0.clone());
        let id = GalleryId::from_raw(3);
        root.write(id, "photo.jpg").await;

        store.delete(id, "photo.jpg").await.unwrap();

        assert!(store.list(id).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(id, "photo.jpg").await,
            Err(GalleryError::ImageNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_refuses_non_image_names() {
        let root = TempRoot::new().await;
        let store = ImageStore::new(root.0.clone());
        let id = GalleryId::from_raw(3);
        root.write(id, "notes.txt").await;

        for name in ["notes.txt", "../3/notes.txt"] {
            assert!(matches!(
                store.delete(id, name).await,
                Err(GalleryError::ImageNotFound)
            ));
        }
        assert!(store.gallery_dir(id).join("notes.txt").exists());
    }
}

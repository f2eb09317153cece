//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::GalleryAppState;
pub use middleware::{OwnedGallery, require_gallery_owner};
pub use router::gallery_router;

//! Gallery Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Gallery entity, image naming rules, repository trait
//! - `application/` - Gallery validator pipeline, configuration
//! - `infra/` - Postgres and in-memory repositories, image files
//! - `presentation/` - HTTP handlers, ownership gate, router
//!
//! ## Access Model
//! - Listing and creating galleries requires an identified user
//! - Editing, deleting and viewing images requires owning the gallery;
//!   everyone else gets `404`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{GalleryConfig, GalleryValidator};
pub use domain::entity::Gallery;
pub use domain::repository::GalleryRepository;
pub use error::{GalleryError, GalleryResult};
pub use infra::{InMemoryGalleryRepository, PgGalleryRepository};
pub use presentation::handlers::GalleryAppState;
pub use presentation::router::gallery_router;

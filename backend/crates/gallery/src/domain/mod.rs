//! Domain Layer
//!
//! Gallery entity, image naming rules, repository trait.

pub mod entity;
pub mod image;
pub mod repository;

pub use entity::Gallery;
pub use repository::GalleryRepository;

//! Application Layer

pub mod config;
pub mod gallery_rules;
pub mod gallery_validator;

pub use config::GalleryConfig;
pub use gallery_validator::GalleryValidator;

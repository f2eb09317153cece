//! Infrastructure Layer

pub mod images;
pub mod memory;
pub mod postgres;

pub use images::ImageStore;
pub use memory::InMemoryGalleryRepository;
pub use postgres::PgGalleryRepository;

//! Gallery Validation Rules

use kernel::validation::Check;

use crate::domain::entity::Gallery;
use crate::error::{GalleryError, GalleryResult};

type GalleryCheckFn = fn(&mut Gallery) -> GalleryResult<()>;

pub type GalleryCheck = Check<GalleryCheckFn>;

pub static ID_POSITIVE: GalleryCheck = Check::new("id_positive", id_positive as GalleryCheckFn);
pub static OWNER_REQUIRED: GalleryCheck =
    Check::new("owner_required", owner_required as GalleryCheckFn);
pub static TITLE_REQUIRED: GalleryCheck =
    Check::new("title_required", title_required as GalleryCheckFn);

fn id_positive(gallery: &mut Gallery) -> GalleryResult<()> {
    if !gallery.id.is_assigned() {
        return Err(GalleryError::IdInvalid);
    }
    Ok(())
}

fn owner_required(gallery: &mut Gallery) -> GalleryResult<()> {
    if !gallery.owner_id.is_assigned() {
        return Err(GalleryError::OwnerRequired);
    }
    Ok(())
}

fn title_required(gallery: &mut Gallery) -> GalleryResult<()> {
    if gallery.title.is_empty() {
        return Err(GalleryError::TitleRequired);
    }
    Ok(())
}

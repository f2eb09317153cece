//! Image File Names
//!
//! Only plain file names with an image extension are served. Anything that
//! could step outside the gallery directory is treated as absent.

const IMAGE_TYPES: [(&str, &str); 3] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
];

/// MIME type for a servable image file name, `None` otherwise.
pub fn content_type(filename: &str) -> Option<&'static str> {
    if filename.is_empty()
        || filename.starts_with('.')
        || filename.contains(['/', '\\', '\0'])
        || filename.contains("..")
    {
        return None;
    }

    let (_, ext) = filename.rsplit_once('.')?;
    IMAGE_TYPES
        .iter()
        .find(|(known, _)| ext.eq_ignore_ascii_case(known))
        .map(|(_, mime)| *mime)
}

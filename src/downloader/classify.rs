//! Asset classification by content type and image header inspection

use crate::records::MediaKind;

const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument",
    "application/vnd.ms-excel",
    "application/vnd.ms-powerpoint",
    "text/csv",
];

/// Path extensions that mark an `<a href>` as a document link
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".csv",
];

/// Classifies a response by its declared content type
pub fn categorize(content_type: &str) -> MediaKind {
    let content_type = content_type.to_lowercase();

    if IMAGE_TYPES.iter().any(|t| content_type.contains(t)) {
        MediaKind::Image
    } else if DOCUMENT_TYPES.iter().any(|t| content_type.contains(t)) {
        MediaKind::Document
    } else {
        MediaKind::Other
    }
}

/// Reads `(width, height)` from an image header
///
/// Only the leading bytes are inspected; anything `imagesize` does not
/// recognize yields None.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let size = imagesize::blob_size(bytes).ok()?;
    Some((u32::try_from(size.width).ok()?, u32::try_from(size.height).ok()?))
}

/// `WxH` string for catalogs
pub fn format_dimensions(bytes: &[u8]) -> Option<String> {
    image_dimensions(bytes).map(|(w, h)| format!("{}x{}", w, h))
}

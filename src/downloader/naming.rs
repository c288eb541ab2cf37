//! File naming for downloaded assets

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use url::Url;

/// Extensions for the content types this site actually serves
///
/// Checked before `mime_guess`, whose first suggestion for some types is an
/// unusual alias (`.jpe` for JPEG).
const KNOWN_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
    ("application/pdf", ".pdf"),
    ("application/msword", ".doc"),
    ("application/vnd.ms-excel", ".xls"),
    ("application/vnd.ms-powerpoint", ".ppt"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xlsx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".pptx",
    ),
    ("text/csv", ".csv"),
    ("text/plain", ".txt"),
    ("text/html", ".html"),
];

/// Hex SHA-256 of the given bytes
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Derives the on-disk name for a downloaded URL
///
/// Uses the last path segment when it has an extension. Otherwise a name is
/// synthesized from the URL hash and the extension is inferred from the
/// response content type (left off when unknown).
pub fn derive_filename(url: &str, content_type: &str) -> String {
    if let Some(basename) = url_basename(url) {
        if has_extension(&basename) {
            return basename;
        }
    }

    let mut name = synthesized_name(url);
    if let Some(ext) = extension_for_content_type(content_type) {
        name.push_str(&ext);
    }
    name
}

/// `file_<first 8 hex chars of the URL hash>`
pub fn synthesized_name(url: &str) -> String {
    let digest = content_hash(url.as_bytes());
    format!("file_{}", &digest[..8])
}

/// Maps a declared content type to a file extension, including the dot
pub fn extension_for_content_type(content_type: &str) -> Option<String> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    if mime.is_empty() {
        return None;
    }

    if let Some((_, ext)) = KNOWN_EXTENSIONS.iter().find(|(m, _)| *m == mime) {
        return Some((*ext).to_string());
    }

    mime_guess::get_mime_extensions_str(&mime)
        .and_then(|exts| exts.first())
        .map(|ext| format!(".{}", ext))
}

/// Returns `dir/filename`, or `dir/stem_<n>.ext` for the first free `n`
pub fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = split_extension(filename);
    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{}_{}{}", stem, counter, ext));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn url_basename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

fn has_extension(name: &str) -> bool {
    matches!(name.rfind('.'), Some(i) if i > 0 && i < name.len() - 1)
}

/// Splits at the last dot, keeping the dot with the extension
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(i) if i > 0 => filename.split_at(i),
        _ => (filename, ""),
    }
}

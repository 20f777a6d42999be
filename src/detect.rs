//! Media type detection from filenames and URLs.

use crate::model::BlockType;

/// Known file extensions and their MIME types.
const EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
    ("avif", "image/avif"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("flac", "audio/flac"),
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("txt", "text/plain"),
    ("zip", "application/zip"),
];

/// Extract the lowercase extension from a filename or URL.
///
/// Query strings and fragments are ignored, so
/// `"https://cdn/x/photo.PNG?w=200"` yields `"png"`.
pub fn extension(name: &str) -> Option<String> {
    let path = name.split(&['?', '#'][..]).next().unwrap_or(name);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Guess a MIME type from a filename or URL.
///
/// # Example
/// ```
/// use topicgrid::detect::mime_from_name;
///
/// assert_eq!(mime_from_name("lecture.mp4"), Some("video/mp4"));
/// assert_eq!(mime_from_name("notes"), None);
/// ```
pub fn mime_from_name(name: &str) -> Option<&'static str> {
    let ext = extension(name)?;
    EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Top-level family of a MIME type (`"image"` for `"image/png"`).
pub fn mime_family(mime: &str) -> &str {
    mime.split('/').next().unwrap_or(mime).trim()
}

/// Check if a declared MIME type is consistent with a block kind.
///
/// Kinds without a family (documents) accept anything.
pub fn mime_matches_kind(mime: &str, kind: BlockType) -> bool {
    match kind.mime_family() {
        Some(family) => mime_family(mime).eq_ignore_ascii_case(family),
        None => true,
    }
}

/// Suggest a block kind for a MIME type.
pub fn kind_for_mime(mime: &str) -> BlockType {
    match mime_family(mime).to_ascii_lowercase().as_str() {
        "image" => BlockType::Image,
        "video" => BlockType::Video,
        "audio" => BlockType::Audio,
        _ => BlockType::Document,
    }
}

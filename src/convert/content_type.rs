//! Content-type inference for attachments.

use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Pick the MIME type of an attachment.
///
/// A well-formed `PR_ATTACH_MIME_TAG` wins; otherwise the type is inferred
/// from the filename extension.
pub fn content_type_for(filename: &str, mime_tag: Option<&str>) -> String {
    if let Some(tag) = mime_tag.map(str::trim).filter(|t| is_mime_type(t)) {
        return tag.to_ascii_lowercase();
    }
    from_extension(filename).to_string()
}

/// Infer a MIME type from the extension of `filename` (case-insensitive).
pub fn from_extension(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        // Images
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") | Some("jpe") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("webp") => "image/webp",
        Some("emf") => "image/emf",
        Some("wmf") => "image/wmf",
        // Text
        Some("txt") | Some("log") => "text/plain",
        Some("htm") | Some("html") => "text/html",
        Some("css") => "text/css",
        Some("csv") => "text/csv",
        Some("xml") => "text/xml",
        Some("ics") => "text/calendar",
        Some("vcf") => "text/vcard",
        // Documents
        Some("pdf") => "application/pdf",
        Some("rtf") => "application/rtf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("odt") => "application/vnd.oasis.opendocument.text",
        Some("json") => "application/json",
        Some("js") => "application/javascript",
        // Archives
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("7z") => "application/x-7z-compressed",
        // Mail
        Some("eml") => "message/rfc822",
        Some("msg") | Some("oft") => "application/vnd.ms-outlook",
        // Media
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// `true` for strings shaped like `type/subtype` with no whitespace.
fn is_mime_type(s: &str) -> bool {
    match s.split_once('/') {
        Some((kind, sub)) => {
            !kind.is_empty()
                && !sub.is_empty()
                && !sub.contains('/')
                && !s.contains(char::is_whitespace)
        }
        None => false,
    }
}

//! MIME helpers for base64 payloads.

use std::path::Path;

/// MIME types the API accepts as an explicit `data:` prefix.
pub const SUPPORTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "application/pdf"];

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// MIME type derived from a file name's extension.
pub fn mime_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MIME_TYPE,
    }
}

/// Ensure a base64 string carries a `data:<mime>;base64,` prefix.
///
/// A string that already starts with `data:` is returned unchanged, even when
/// its embedded type disagrees with `file_name`. Otherwise the type is taken
/// from the file name's extension.
///
/// ```rust
/// use veryfi::mime::add_mime_type;
///
/// let once = add_mime_type("aGVsbG8=", "receipt.png");
/// assert_eq!(once, "data:image/png;base64,aGVsbG8=");
/// assert_eq!(add_mime_type(&once, "receipt.png"), once);
/// ```
pub fn add_mime_type(base64: &str, file_name: &str) -> String {
    if base64.starts_with("data:") {
        return base64.to_string();
    }
    format!("data:{};base64,{}", mime_type_for(file_name), base64)
}

/// Whether a base64 string is prefixed with one of [`SUPPORTED_MIME_TYPES`].
pub fn check_mime_type(base64: &str) -> bool {
    SUPPORTED_MIME_TYPES.iter().any(|mime| {
        base64
            .strip_prefix("data:")
            .and_then(|rest| rest.strip_prefix(mime))
            .is_some_and(|rest| rest.starts_with(";base64,"))
    })
}

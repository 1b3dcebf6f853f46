//! MIME type detection module
//!
//! Maps static asset extensions to Content-Type values.

/// Fallback for extensions outside the table
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Get MIME Content-Type based on file extension
///
/// Lookup is exact: `CSS` or `htm` fall back to `application/octet-stream`.
///
/// # Examples
/// ```
/// use memories_server::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("css")), "text/css");
/// assert_eq!(get_content_type(Some("webp")), "application/octet-stream");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html") => "text/html",
        Some("css") => "text/css",

        // Scripts and data
        Some("js") => "application/javascript",
        Some("json") => "application/json",

        // Images
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("eot") => "application/vnd.ms-fontobject",

        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let table = [
            ("css", "text/css"),
            ("js", "application/javascript"),
            ("jpg", "image/jpeg"),
            ("jpeg", "image/jpeg"),
            ("png", "image/png"),
            ("gif", "image/gif"),
            ("svg", "image/svg+xml"),
            ("ico", "image/x-icon"),
            ("woff", "font/woff"),
            ("woff2", "font/woff2"),
            ("ttf", "font/ttf"),
            ("eot", "application/vnd.ms-fontobject"),
            ("html", "text/html"),
            ("json", "application/json"),
        ];
        for (ext, expected) in table {
            assert_eq!(get_content_type(Some(ext)), expected, "extension {ext}");
        }
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("mp4")), DEFAULT_CONTENT_TYPE);
        assert_eq!(get_content_type(Some("CSS")), DEFAULT_CONTENT_TYPE);
        assert_eq!(get_content_type(None), DEFAULT_CONTENT_TYPE);
    }
}

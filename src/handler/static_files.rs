//! Static asset serving module
//!
//! Requests under `/assets/` are answered from `<root>/public/` and never reach
//! the route table: a missing file is a 404, not a fall-through.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::handler::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

/// Reserved URI prefix for static assets
pub const ASSET_PREFIX: &str = "/assets/";
/// Directory under the asset root that `/assets/` maps onto
pub const PUBLIC_DIR: &str = "public";

/// Serve the request if it targets a static asset
///
/// Returns `None` when the path is outside `/assets/`, so routing should go on.
/// Any `Some` response ends request processing.
pub async fn serve_static(ctx: &RequestContext, root_dir: &str) -> Option<Response<Full<Bytes>>> {
    let relative = ctx.path.strip_prefix(ASSET_PREFIX)?;
    let public_dir = Path::new(root_dir).join(PUBLIC_DIR);

    let Some((content, content_type)) = load_asset(&public_dir, relative).await else {
        logger::log_warning(&format!("Asset not found: {}", ctx.path));
        return Some(http::build_asset_not_found());
    };

    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(ctx.header("if-none-match"), &etag) {
        return Some(http::build_304_response(&etag));
    }

    Some(http::build_asset_response(
        Bytes::from(content),
        content_type,
        &etag,
    ))
}

/// Read `<public_dir>/<relative>` if it is a regular file inside `public_dir`
async fn load_asset(public_dir: &Path, relative: &str) -> Option<(Vec<u8>, &'static str)> {
    let file_path = public_dir.join(relative);

    let public_canonical = match fs::canonicalize(public_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Public directory not found or inaccessible '{}': {e}",
                public_dir.display()
            ));
            return None;
        }
    };

    // Missing files are the common 404 case, the caller logs them
    let file_canonical: PathBuf = fs::canonicalize(&file_path).await.ok()?;
    if !file_canonical.starts_with(&public_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            relative,
            file_canonical.display()
        ));
        return None;
    }

    if !fs::metadata(&file_canonical).await.ok()?.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read asset '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{HeaderValue, IF_NONE_MATCH};
    use hyper::{HeaderMap, Method, Uri};

    /// Asset root with `public/style.css`, `public/img/logo.png` and a secret
    /// file next to `public/`
    fn fixture(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "memories-assets-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("public/img")).unwrap();
        std::fs::write(root.join("public/style.css"), "body { margin: 0 }").unwrap();
        std::fs::write(root.join("public/img/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        std::fs::write(root.join("public/notes.xyz"), "?").unwrap();
        std::fs::write(root.join("secret.txt"), "top secret").unwrap();
        root
    }

    fn ctx(path: &str, headers: HeaderMap) -> RequestContext {
        let uri: Uri = path.parse().unwrap();
        RequestContext::new(Method::GET, &uri, headers, "/")
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn test_non_asset_path_passes_through() {
        let root = fixture("passthrough");
        let root = root.to_str().unwrap();
        assert!(serve_static(&ctx("/gallery", HeaderMap::new()), root).await.is_none());
        assert!(serve_static(&ctx("/assets", HeaderMap::new()), root).await.is_none());
        assert!(serve_static(&ctx("/public/style.css", HeaderMap::new()), root).await.is_none());
    }

    #[tokio::test]
    async fn test_serves_css() {
        let root = fixture("css");
        let resp = serve_static(&ctx("/assets/style.css", HeaderMap::new()), root.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/css");
        assert!(resp.headers().contains_key("etag"));
        assert_eq!(body_string(resp).await, "body { margin: 0 }");
    }

    #[tokio::test]
    async fn test_nested_and_unknown_types() {
        let root = fixture("types");
        let root = root.to_str().unwrap();

        let resp = serve_static(&ctx("/assets/img/logo.png", HeaderMap::new()), root)
            .await
            .unwrap();
        assert_eq!(resp.headers()["content-type"], "image/png");

        let resp = serve_static(&ctx("/assets/notes.xyz", HeaderMap::new()), root)
            .await
            .unwrap();
        assert_eq!(resp.headers()["content-type"], "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let log = crate::logger::writer::capture_for_tests();
        let root = fixture("missing");
        let resp = serve_static(&ctx("/assets/nope.css", HeaderMap::new()), root.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        assert_eq!(body_string(resp).await, "Asset not found!");

        let logged = std::fs::read_to_string(log).unwrap();
        assert!(logged.contains("[WARN] Asset not found: /assets/nope.css"), "{logged}");
    }

    #[tokio::test]
    async fn test_asset_path_is_not_percent_decoded() {
        let root = fixture("encoded");
        std::fs::write(root.join("public/my%20photo.jpg"), "raw").unwrap();
        std::fs::write(root.join("public/beach day.jpg"), "decoded").unwrap();
        let root = root.to_str().unwrap();

        let resp = serve_static(&ctx("/assets/my%20photo.jpg", HeaderMap::new()), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "image/jpeg");
        assert_eq!(body_string(resp).await, "raw");

        let resp = serve_static(&ctx("/assets/beach%20day.jpg", HeaderMap::new()), root)
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_directory_is_404() {
        let root = fixture("dir");
        let resp = serve_static(&ctx("/assets/img", HeaderMap::new()), root.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let root = fixture("traversal");
        let resp = serve_static(
            &ctx("/assets/../secret.txt", HeaderMap::new()),
            root.to_str().unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), 404);
        assert_eq!(body_string(resp).await, "Asset not found!");
    }

    #[tokio::test]
    async fn test_if_none_match_returns_304() {
        let root = fixture("etag");
        let root = root.to_str().unwrap();
        let first = serve_static(&ctx("/assets/style.css", HeaderMap::new()), root)
            .await
            .unwrap();
        let etag = first.headers()["etag"].clone();

        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, etag);
        let resp = serve_static(&ctx("/assets/style.css", headers), root).await.unwrap();
        assert_eq!(resp.status(), 304);

        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"stale\""));
        let resp = serve_static(&ctx("/assets/style.css", headers), root).await.unwrap();
        assert_eq!(resp.status(), 200);
    }
}

//! Route table of the memories site and its small shop
//!
//! Pages are plain HTML shells; the real templates live outside this crate.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::error::Result;
use crate::http;
use crate::routing::{PathParams, QueryParams, Router};

/// Build the site's router
pub fn router() -> Result<Router> {
    Router::builder()
        .get("/", |_: &PathParams, _: &QueryParams| page("Home Page", "<p>Welcome back.</p>"))
        .get("/about", |_: &PathParams, _: &QueryParams| page("About Us", "<p>Our memories.</p>"))
        .get("/gallery", gallery_index)
        .get("/gallery/{album}", gallery_album)
        .get("/login", login)
        .get("/shop", |_: &PathParams, _: &QueryParams| page("Shop", "<p>Prints and albums.</p>"))
        .get("/product/{id}", product)
        .get_gated("/dashboard", |_: &PathParams, _: &QueryParams| {
            page("Dashboard", "<p>Your albums and orders.</p>")
        })
        .any_gated("/cart", |_: &PathParams, _: &QueryParams| page("Cart", "<p>Your cart.</p>"))
        .get_gated("/order/{id}", order)
        .build()
}

fn gallery_index(_: &PathParams, query: &QueryParams) -> Response<Full<Bytes>> {
    let page_no = query.get("page").map_or("1", String::as_str);
    page("Gallery", &format!("<p>Page {}</p>", escape_html(page_no)))
}

fn gallery_album(params: &PathParams, query: &QueryParams) -> Response<Full<Bytes>> {
    let album = params.get("album").unwrap_or_default();
    let mut body = format!("<h2>{}</h2>", escape_html(album));
    if let Some(photo) = query.get("photo") {
        body.push_str(&format!("<p>Photo {}</p>", escape_html(photo)));
    }
    page("Album", &body)
}

fn login(_: &PathParams, query: &QueryParams) -> Response<Full<Bytes>> {
    let redirect = query.get("redirect_path").map_or("/", String::as_str);
    page(
        "Login",
        &format!(
            "<form method=\"post\" action=\"/login\">\
             <input type=\"hidden\" name=\"redirect_path\" value=\"{}\">\
             <button>Sign in</button></form>",
            escape_html(redirect)
        ),
    )
}

fn product(params: &PathParams, _: &QueryParams) -> Response<Full<Bytes>> {
    let id = params.get("id").unwrap_or_default();
    page("Product", &format!("<p>Product #{}</p>", escape_html(id)))
}

fn order(params: &PathParams, _: &QueryParams) -> Response<Full<Bytes>> {
    let id = params.get("id").unwrap_or_default();
    page("Order", &format!("<p>Order #{}</p>", escape_html(id)))
}

/// Wrap a body fragment in the shared page shell
fn page(title: &str, body: &str) -> Response<Full<Bytes>> {
    let title = escape_html(title);
    http::build_html_response(
        200,
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <link rel=\"stylesheet\" href=\"/assets/css/style.css\">\n</head>\n\
             <body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>"
        ),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::Method;

    async fn render(method: Method, path: &str, query: &[(&str, &str)]) -> (u16, String) {
        let router = router().unwrap();
        let m = router.find(&method, path).unwrap();
        let query: QueryParams = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let resp = (m.route.handler)(&m.params, &query);
        let status = resp.status().as_u16();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_gated_routes() {
        let router = router().unwrap();
        let gated: Vec<_> = router
            .routes()
            .iter()
            .filter(|r| r.auth_required)
            .map(|r| r.raw_path())
            .collect();
        assert_eq!(gated, ["/dashboard", "/cart", "/order/{id}"]);
    }

    #[tokio::test]
    async fn test_home_title() {
        let (status, html) = render(Method::GET, "/", &[]).await;
        assert_eq!(status, 200);
        assert!(html.contains("<title>Home Page</title>"));
    }

    #[tokio::test]
    async fn test_album_param_escaped() {
        let (_, html) = render(Method::GET, "/gallery/<paris>", &[("photo", "3")]).await;
        assert!(html.contains("<h2>&lt;paris&gt;</h2>"));
        assert!(html.contains("<p>Photo 3</p>"));
    }

    #[tokio::test]
    async fn test_login_keeps_redirect_path() {
        let (_, html) = render(Method::GET, "/login", &[("redirect_path", "/order/42")]).await;
        assert!(html.contains("value=\"/order/42\""));
    }

    #[tokio::test]
    async fn test_cart_answers_any_method() {
        let (status, html) = render(Method::POST, "/cart", &[]).await;
        assert_eq!(status, 200);
        assert!(html.contains("<title>Cart</title>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
    }
}

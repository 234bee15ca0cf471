use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

use mealplanner_shared::BASE_PATH;

const STATIC_EXTENSIONS: [&str; 9] = [
    ".css", ".js", ".png", ".jpg", ".svg", ".webp", ".ico", ".woff", ".woff2",
];

/// Pages render backend data and are never cached. Asset files may be.
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;

    let is_asset = path.starts_with("/static/")
        && !path.starts_with(BASE_PATH)
        && STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext));

    let headers = response.headers_mut();

    if is_asset {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
    } else {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }

    response
}

//! Router harness backed by the in-memory backend.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mealplanner::config::{ApiConfig, Config, ObservabilityConfig, ServerConfig};
use mealplanner_shared::testing::MemoryBackend;
use tower::ServiceExt;

pub const BASE: &str = "/static/react_app";

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    /// Number of times `needle` appears in the body.
    pub fn count(&self, needle: &str) -> usize {
        self.body.matches(needle).count()
    }
}

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        api: ApiConfig {
            base_url: "http://127.0.0.1:5000".to_owned(),
            timeout_secs: 30,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn app(backend: &MemoryBackend) -> Router {
    mealplanner::create_app(config(), Arc::new(backend.clone()))
}

async fn send(backend: &MemoryBackend, request: Request<Body>) -> anyhow::Result<Page> {
    let response = app(backend).oneshot(request).await?;

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str())
        .transpose()?
        .map(str::to_owned);
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(Page {
        status,
        location,
        body: String::from_utf8(bytes.to_vec())?,
    })
}

pub async fn get(backend: &MemoryBackend, path: &str) -> anyhow::Result<Page> {
    send(backend, Request::builder().uri(path).body(Body::empty())?).await
}

pub async fn post(
    backend: &MemoryBackend,
    path: &str,
    fields: &[(&str, &str)],
) -> anyhow::Result<Page> {
    send(backend, form_request(path, fields, false)?).await
}

/// Same as `post`, sent the way htmx does.
pub async fn hx_post(
    backend: &MemoryBackend,
    path: &str,
    fields: &[(&str, &str)],
) -> anyhow::Result<Page> {
    send(backend, form_request(path, fields, true)?).await
}

fn form_request(path: &str, fields: &[(&str, &str)], htmx: bool) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if htmx {
        builder = builder.header("HX-Request", "true");
    }

    Ok(builder.body(Body::from(serde_urlencoded::to_string(fields)?))?)
}

pub fn recipe_id(backend: &MemoryBackend, name: &str) -> anyhow::Result<String> {
    backend
        .recipes()
        .into_iter()
        .find(|recipe| recipe.name == name)
        .map(|recipe| recipe.id)
        .ok_or_else(|| anyhow::anyhow!("recipe {name} not found"))
}

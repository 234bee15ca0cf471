pub mod config;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

use std::sync::Arc;

use mealplanner_shared::Api;

pub use routes::AppState;

/// Router with every page, without the serving layers.
///
/// Used by the server and by integration tests, which pass an in-memory backend.
pub fn create_app(config: config::Config, api: Arc<dyn Api>) -> axum::Router {
    routes::router(AppState { config, api })
}

use std::sync::Arc;

use axum::{
    Router,
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use mealplanner_shared::{Api, BASE_PATH, Route};

use crate::template::Template;

mod action;
mod health;
mod meal_plans;
mod recipes;

pub use action::Action;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub api: Arc<dyn Api>,
}

/// Unknown paths under the client mount redirect to their canonical form when
/// they name a page, e.g. with a trailing slash. Anything else is a 404.
pub async fn fallback(template: Template, uri: Uri) -> Response {
    match Route::resolve(uri.path()) {
        Some(route) if route.path() != uri.path() => Redirect::to(&route.path()).into_response(),
        _ => template.not_found(),
    }
}

pub async fn index() -> Redirect {
    Redirect::to(&Route::Recipes.path())
}

fn client(path: &str) -> String {
    format!("{BASE_PATH}{path}")
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index))
        .route(BASE_PATH, get(index))
        .route(&client("/"), get(index))
        .route(&client("/recipes"), get(recipes::index::page))
        .route(
            &client("/recipes/new"),
            get(recipes::form::create_page).post(recipes::form::create_action),
        )
        .route(&client("/recipes/{id}"), get(recipes::detail::page))
        .route(
            &client("/recipes/{id}/edit"),
            get(recipes::form::edit_page).post(recipes::form::edit_action),
        )
        .route(
            &client("/recipes/{id}/delete"),
            get(recipes::detail::delete_page).post(recipes::detail::delete_action),
        )
        .route(&client("/meal-plans"), get(meal_plans::index::page))
        .route(
            &client("/meal-plans/new"),
            get(meal_plans::form::create_page).post(meal_plans::form::create_action),
        )
        .route(&client("/meal-plans/{id}"), get(meal_plans::detail::page))
        .route(
            &client("/meal-plans/{id}/edit"),
            get(meal_plans::form::edit_page).post(meal_plans::form::edit_action),
        )
        .route(
            &client("/meal-plans/{id}/delete"),
            get(meal_plans::detail::delete_page).post(meal_plans::detail::delete_action),
        )
        .route(
            &client("/meal-plans/{id}/shopping-list"),
            post(meal_plans::shopping_list::action),
        )
        .route(
            &client("/meal-plans/{id}/shopping-list/generate"),
            post(meal_plans::shopping_list::generate),
        )
        .fallback(fallback)
        .with_state(app_state)
}

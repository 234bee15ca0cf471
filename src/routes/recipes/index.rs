use axum::{extract::State, response::IntoResponse};
use mealplanner_recipe::RecipeList;
use mealplanner_shared::Route;

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "recipes-index.html")]
pub struct IndexTemplate {
    pub current_path: String,
    pub view: RecipeList,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            current_path: "recipes".to_owned(),
            view: RecipeList::default(),
        }
    }
}

impl IndexTemplate {
    fn recipe_url(&self, id: &str) -> String {
        Route::Recipe(id.to_owned()).path()
    }

    fn new_url(&self) -> String {
        Route::NewRecipe.path()
    }
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let view = RecipeList::load(app.api.as_ref()).await;

    template.render(IndexTemplate {
        view,
        ..Default::default()
    })
}

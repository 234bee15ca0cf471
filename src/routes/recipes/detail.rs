use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use mealplanner_recipe::RecipeDetail;
use mealplanner_shared::Route;

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "recipes-detail.html")]
pub struct DetailTemplate {
    pub current_path: String,
    pub view: RecipeDetail,
}

impl Default for DetailTemplate {
    fn default() -> Self {
        Self {
            current_path: "recipes".to_owned(),
            view: RecipeDetail::default(),
        }
    }
}

impl DetailTemplate {
    fn edit_url(&self) -> String {
        Route::EditRecipe(self.view.id.to_owned()).path()
    }

    fn delete_url(&self) -> String {
        format!("{}/delete", Route::Recipe(self.view.id.to_owned()).path())
    }

    fn list_url(&self) -> String {
        Route::Recipes.path()
    }
}

#[derive(askama::Template)]
#[template(path = "recipes-delete.html")]
pub struct DeleteTemplate {
    pub current_path: String,
    pub view: RecipeDetail,
}

impl Default for DeleteTemplate {
    fn default() -> Self {
        Self {
            current_path: "recipes".to_owned(),
            view: RecipeDetail::default(),
        }
    }
}

impl DeleteTemplate {
    fn delete_url(&self) -> String {
        format!("{}/delete", Route::Recipe(self.view.id.to_owned()).path())
    }

    fn cancel_url(&self) -> String {
        Route::Recipe(self.view.id.to_owned()).path()
    }
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> impl IntoResponse {
    let view = RecipeDetail::load(app.api.as_ref(), &id).await;

    template.render(DetailTemplate {
        view,
        ..Default::default()
    })
}

/// Confirmation step before a delete.
pub async fn delete_page(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> impl IntoResponse {
    let view = RecipeDetail::load(app.api.as_ref(), &id).await;

    template.render(DeleteTemplate {
        view,
        ..Default::default()
    })
}

pub async fn delete_action(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> Response {
    let api = app.api.as_ref();

    match RecipeDetail::delete(api, &id).await {
        Ok(route) => Redirect::to(&route.path()).into_response(),
        Err(err) => {
            let view = RecipeDetail::load(api, &id).await.with_delete_error(&err);

            template.render(DetailTemplate {
                view,
                ..Default::default()
            })
        }
    }
}

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use mealplanner_mealplan::MealPlanDetail;
use mealplanner_shared::{Api, Route};
use mealplanner_shopping::ShoppingListView;

use super::shopping_list::ShoppingSection;
use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "meal-plans-detail.html")]
pub struct DetailTemplate {
    pub current_path: String,
    pub view: MealPlanDetail,
    pub shopping: ShoppingListView,
    pub pdf_url: String,
}

impl Default for DetailTemplate {
    fn default() -> Self {
        Self {
            current_path: "meal-plans".to_owned(),
            view: MealPlanDetail::default(),
            shopping: ShoppingListView::new(""),
            pdf_url: String::new(),
        }
    }
}

impl ShoppingSection for DetailTemplate {
    fn shopping(&self) -> &ShoppingListView {
        &self.shopping
    }

    fn pdf_url(&self) -> &str {
        &self.pdf_url
    }
}

impl DetailTemplate {
    fn recipe_url(&self, id: &str) -> String {
        Route::Recipe(id.to_owned()).path()
    }

    fn edit_url(&self) -> String {
        Route::EditMealPlan(self.view.id.to_owned()).path()
    }

    fn delete_url(&self) -> String {
        format!("{}/delete", Route::MealPlan(self.view.id.to_owned()).path())
    }

    fn list_url(&self) -> String {
        Route::MealPlans.path()
    }
}

#[derive(askama::Template)]
#[template(path = "meal-plans-delete.html")]
pub struct DeleteTemplate {
    pub current_path: String,
    pub view: MealPlanDetail,
}

impl Default for DeleteTemplate {
    fn default() -> Self {
        Self {
            current_path: "meal-plans".to_owned(),
            view: MealPlanDetail::default(),
        }
    }
}

impl DeleteTemplate {
    fn delete_url(&self) -> String {
        format!("{}/delete", Route::MealPlan(self.view.id.to_owned()).path())
    }

    fn cancel_url(&self) -> String {
        Route::MealPlan(self.view.id.to_owned()).path()
    }
}

/// The plan, its recipes, then its shopping list once the plan is known.
async fn load(api: &dyn Api, id: &str) -> DetailTemplate {
    let view = MealPlanDetail::load(api, id).await;
    let mut shopping = ShoppingListView::new(id);

    if view.state.ready().is_some() {
        shopping.load(api).await;
    }

    DetailTemplate {
        view,
        shopping,
        pdf_url: api.shopping_list_pdf_url(id),
        ..Default::default()
    }
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> impl IntoResponse {
    template.render(load(app.api.as_ref(), &id).await)
}

pub async fn delete_page(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> impl IntoResponse {
    let view = MealPlanDetail::load(app.api.as_ref(), &id).await;

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

    match MealPlanDetail::delete(api, &id).await {
        Ok(route) => Redirect::to(&route.path()).into_response(),
        Err(err) => {
            let mut page = load(api, &id).await;
            page.view = page.view.with_delete_error(&err);

            template.render(page)
        }
    }
}

use axum::{extract::State, response::IntoResponse};
use mealplanner_mealplan::MealPlanList;
use mealplanner_shared::Route;

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "meal-plans-index.html")]
pub struct IndexTemplate {
    pub current_path: String,
    pub view: MealPlanList,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            current_path: "meal-plans".to_owned(),
            view: MealPlanList::default(),
        }
    }
}

impl IndexTemplate {
    fn meal_plan_url(&self, id: &str) -> String {
        Route::MealPlan(id.to_owned()).path()
    }

    fn new_url(&self) -> String {
        Route::NewMealPlan.path()
    }
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let view = MealPlanList::load(app.api.as_ref()).await;

    template.render(IndexTemplate {
        view,
        ..Default::default()
    })
}

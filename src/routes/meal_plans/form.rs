use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use mealplanner_mealplan::{MealPlanDraft, MealPlanEditor, MealPlanForm, RecipeOption};
use mealplanner_shared::Route;
use serde::Deserialize;

use crate::{
    routes::{Action, AppState},
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "meal-plans-form.html")]
pub struct FormTemplate {
    pub current_path: String,
    pub form: MealPlanForm,
}

impl Default for FormTemplate {
    fn default() -> Self {
        Self {
            current_path: "meal-plans".to_owned(),
            form: MealPlanForm::default(),
        }
    }
}

impl FormTemplate {
    fn action_url(&self) -> String {
        match &self.form.id {
            Some(id) => Route::EditMealPlan(id.to_owned()).path(),
            None => Route::NewMealPlan.path(),
        }
    }

    fn cancel_url(&self) -> String {
        self.form.cancel_route().path()
    }

    fn new_recipe_url(&self) -> String {
        Route::NewRecipe.path()
    }
}

/// Meal plan form fields. The recipe choices shown on the page are posted
/// back as `option_id`/`option_name` pairs so a rejected submission can be
/// rendered again without refetching them.
#[derive(Deserialize, Debug, Default)]
pub struct MealPlanFormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recipe_ids: Vec<String>,
    #[serde(default)]
    pub option_id: Vec<String>,
    #[serde(default)]
    pub option_name: Vec<String>,
    #[serde(default)]
    pub action: String,
}

impl MealPlanFormInput {
    pub fn into_editor(self) -> Option<MealPlanEditor> {
        if self.option_id.len() != self.option_name.len() {
            return None;
        }

        let options = self
            .option_id
            .into_iter()
            .zip(self.option_name)
            .map(|(id, name)| RecipeOption { id, name })
            .collect();

        Some(MealPlanEditor {
            draft: MealPlanDraft {
                name: self.name,
                description: self.description,
                recipe_ids: self.recipe_ids,
            },
            options,
        })
    }
}

pub async fn create_page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let form = MealPlanForm::create(app.api.as_ref()).await;

    template.render(FormTemplate {
        form,
        ..Default::default()
    })
}

pub async fn edit_page(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> impl IntoResponse {
    let form = MealPlanForm::edit(app.api.as_ref(), &id).await;

    template.render(FormTemplate {
        form,
        ..Default::default()
    })
}

pub async fn create_action(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<MealPlanFormInput>,
) -> Response {
    action(template, app, None, input).await
}

pub async fn edit_action(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
    Form(input): Form<MealPlanFormInput>,
) -> Response {
    action(template, app, Some(id), input).await
}

async fn action(
    template: Template,
    app: AppState,
    id: Option<String>,
    input: MealPlanFormInput,
) -> Response {
    if input.action.parse::<Action>() != Ok(Action::Submit) {
        return template.bad_request();
    }

    let Some(editor) = input.into_editor() else {
        return template.bad_request();
    };

    let mut form = MealPlanForm::resume(id, editor);

    if let Some(route) = form.submit(app.api.as_ref()).await {
        return Redirect::to(&route.path()).into_response();
    }

    template.render(FormTemplate {
        form,
        ..Default::default()
    })
}

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use mealplanner_recipe::{IngredientRow, RecipeDraft, RecipeForm};
use mealplanner_shared::{Route, Rows};
use serde::Deserialize;

use crate::{
    routes::{Action, AppState},
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "recipes-form.html")]
pub struct FormTemplate {
    pub current_path: String,
    pub form: RecipeForm,
}

impl Default for FormTemplate {
    fn default() -> Self {
        Self {
            current_path: "recipes".to_owned(),
            form: RecipeForm::default(),
        }
    }
}

impl FormTemplate {
    fn action_url(&self) -> String {
        match &self.form.id {
            Some(id) => Route::EditRecipe(id.to_owned()).path(),
            None => Route::NewRecipe.path(),
        }
    }

    fn cancel_url(&self) -> String {
        self.form.cancel_route().path()
    }
}

/// Every field of the recipe form. Ingredient rows arrive as parallel lists.
#[derive(Deserialize, Debug, Default)]
pub struct RecipeFormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub ingredient_name: Vec<String>,
    #[serde(default)]
    pub ingredient_quantity: Vec<String>,
    #[serde(default)]
    pub ingredient_unit: Vec<String>,
    #[serde(default)]
    pub action: String,
}

impl RecipeFormInput {
    /// `None` when the ingredient lists do not line up.
    pub fn into_draft(self) -> Option<RecipeDraft> {
        let rows = self.ingredient_name.len();
        if self.ingredient_quantity.len() != rows || self.ingredient_unit.len() != rows {
            return None;
        }

        let ingredients: Rows<IngredientRow> = self
            .ingredient_name
            .into_iter()
            .zip(self.ingredient_quantity)
            .zip(self.ingredient_unit)
            .map(|((name, quantity), unit)| IngredientRow {
                name,
                quantity,
                unit,
            })
            .collect();

        Some(RecipeDraft {
            name: self.name,
            description: self.description,
            source_url: self.source_url,
            instructions: self.instructions,
            ingredients,
        })
    }
}

pub async fn create_page(template: Template) -> impl IntoResponse {
    template.render(FormTemplate {
        form: RecipeForm::create(),
        ..Default::default()
    })
}

pub async fn edit_page(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> impl IntoResponse {
    let form = RecipeForm::edit(app.api.as_ref(), &id).await;

    template.render(FormTemplate {
        form,
        ..Default::default()
    })
}

pub async fn create_action(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<RecipeFormInput>,
) -> Response {
    action(template, app, None, input).await
}

pub async fn edit_action(
    template: Template,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
    Form(input): Form<RecipeFormInput>,
) -> Response {
    action(template, app, Some(id), input).await
}

async fn action(
    template: Template,
    app: AppState,
    id: Option<String>,
    input: RecipeFormInput,
) -> Response {
    let Ok(action) = input.action.parse::<Action>() else {
        return template.bad_request();
    };

    let Some(draft) = input.into_draft() else {
        return template.bad_request();
    };

    let mut form = RecipeForm::resume(id, draft);

    match action {
        Action::Add => {
            if let Some(draft) = form.draft_mut() {
                draft.add_ingredient();
            }
        }
        Action::Remove(index) => {
            let Some(draft) = form.draft_mut() else {
                return template.bad_request();
            };

            let Some(key) = draft.ingredients.key_at(index) else {
                return template.bad_request();
            };

            draft.remove_ingredient(key);
        }
        Action::Submit => {
            if let Some(route) = form.submit(app.api.as_ref()).await {
                return Redirect::to(&route.path()).into_response();
            }
        }
        _ => return template.bad_request(),
    }

    template.render(FormTemplate {
        form,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(names: &[&str], quantities: &[&str], units: &[&str]) -> RecipeFormInput {
        let owned =
            |values: &[&str]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };

        RecipeFormInput {
            name: "Pancakes".to_owned(),
            ingredient_name: owned(names),
            ingredient_quantity: owned(quantities),
            ingredient_unit: owned(units),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_draft_keeps_row_order() {
        let draft = input(&["Flour", "Milk"], &["2", ""], &["cups", "ml"])
            .into_draft()
            .unwrap();

        let names: Vec<&str> = draft.ingredients.values().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Milk"]);
        assert_eq!(draft.name, "Pancakes");
    }

    #[test]
    fn test_into_draft_rejects_misaligned_rows() {
        assert!(input(&["Flour", "Milk"], &["2"], &["cups", "ml"]).into_draft().is_none());
    }
}

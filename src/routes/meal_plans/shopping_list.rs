use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use axum_extra::extract::Form;
use mealplanner_shared::{Api, Error, Route, shopping::ShoppingList};
use mealplanner_shopping::{ItemRow, ShoppingListView};
use serde::Deserialize;

use crate::{
    routes::{Action, AppState},
    template::Template,
};

/// Rendering helpers shared by every template embedding
/// `partials/shopping-list.html`.
pub trait ShoppingSection {
    fn shopping(&self) -> &ShoppingListView;

    fn pdf_url(&self) -> &str;

    fn shopping_url(&self) -> String {
        format!(
            "{}/shopping-list",
            Route::MealPlan(self.shopping().meal_plan_id.to_owned()).path()
        )
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.shopping_url())
    }

    /// Last list fetched from the backend, posted back with every interaction.
    fn saved_json(&self) -> String {
        self.shopping()
            .session()
            .and_then(|session| serde_json::to_string(&session.saved).ok())
            .unwrap_or_default()
    }
}

/// The section alone, swapped in place by htmx.
#[derive(askama::Template)]
#[template(path = "partials/shopping-list.html")]
pub struct PartialTemplate {
    pub shopping: ShoppingListView,
    pub pdf_url: String,
}

impl ShoppingSection for PartialTemplate {
    fn shopping(&self) -> &ShoppingListView {
        &self.shopping
    }

    fn pdf_url(&self) -> &str {
        &self.pdf_url
    }
}

/// The section on its own page, for plain form posts.
#[derive(askama::Template)]
#[template(path = "shopping-list-page.html")]
pub struct PageTemplate {
    pub current_path: String,
    pub shopping: ShoppingListView,
    pub pdf_url: String,
}

impl ShoppingSection for PageTemplate {
    fn shopping(&self) -> &ShoppingListView {
        &self.shopping
    }

    fn pdf_url(&self) -> &str {
        &self.pdf_url
    }
}

impl PageTemplate {
    fn meal_plan_url(&self) -> String {
        Route::MealPlan(self.shopping.meal_plan_id.to_owned()).path()
    }
}

/// Every field of the shopping list form. Items arrive as parallel lists.
#[derive(Deserialize, Debug, Default)]
pub struct ShoppingListFormInput {
    #[serde(default)]
    pub saved: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub item_name: Vec<String>,
    #[serde(default)]
    pub item_quantity: Vec<String>,
    #[serde(default)]
    pub item_unit: Vec<String>,
    #[serde(default)]
    pub item_purchased: Vec<String>,
    #[serde(default)]
    pub action: String,
}

impl ShoppingListFormInput {
    pub fn is_editing(&self) -> bool {
        self.mode == "edit"
    }

    /// `None` when the item lists do not line up.
    pub fn items(&self) -> Option<Vec<ItemRow>> {
        let rows = self.item_name.len();
        if self.item_quantity.len() != rows
            || self.item_unit.len() != rows
            || self.item_purchased.len() != rows
        {
            return None;
        }

        let items = (0..rows)
            .map(|i| ItemRow {
                name: self.item_name[i].to_owned(),
                quantity: self.item_quantity[i].to_owned(),
                unit: self.item_unit[i].to_owned(),
                purchased: self.item_purchased[i] == "true",
            })
            .collect();

        Some(items)
    }
}

fn render(
    template: &Template,
    headers: &HeaderMap,
    api: &dyn Api,
    shopping: ShoppingListView,
) -> Response {
    let pdf_url = api.shopping_list_pdf_url(&shopping.meal_plan_id);

    if headers.contains_key("hx-request") {
        return template.render(PartialTemplate { shopping, pdf_url });
    }

    template.render(PageTemplate {
        current_path: "meal-plans".to_owned(),
        shopping,
        pdf_url,
    })
}

/// Loads the plan's list and generates one only when none exists yet.
pub async fn generate(
    template: Template,
    headers: HeaderMap,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> Response {
    let api = app.api.as_ref();
    let mut shopping = ShoppingListView::new(&id);
    shopping.load(api).await;

    if shopping.is_absent() {
        if let Err(err) = shopping.generate(api).await {
            tracing::debug!(meal_plan = id, err = %err, "Shopping list left in failed state");
        }
    }

    render(&template, &headers, api, shopping)
}

/// Every interaction with a loaded list. Only `save` reaches the backend.
pub async fn action(
    template: Template,
    headers: HeaderMap,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
    Form(input): Form<ShoppingListFormInput>,
) -> Response {
    let api = app.api.as_ref();

    let Ok(action) = input.action.parse::<Action>() else {
        return template.bad_request();
    };

    let Ok(saved) = serde_json::from_str::<ShoppingList>(&input.saved) else {
        return template.bad_request();
    };

    let Some(items) = input.items() else {
        return template.bad_request();
    };

    let Ok(mut shopping) = ShoppingListView::resume(&id, saved, items, input.is_editing()) else {
        return template.bad_request();
    };

    let key_at = |shopping: &ShoppingListView, index: usize| {
        shopping
            .session()
            .and_then(|session| session.items.key_at(index))
            .ok_or(Error::InvalidState("unknown shopping list item"))
    };

    let result = match action {
        Action::Toggle(index) => {
            key_at(&shopping, index).and_then(|key| shopping.toggle_purchased(key))
        }
        Action::Edit => shopping.edit(),
        Action::Add => shopping.add_item().map(|_| ()),
        Action::Remove(index) => key_at(&shopping, index).and_then(|key| shopping.remove_item(key)),
        Action::Cancel => shopping.cancel(),
        Action::Save | Action::Submit => shopping.save(api).await,
    };

    match result {
        Err(Error::InvalidState(reason)) => {
            tracing::warn!(meal_plan = id, reason, "Shopping list action out of sequence");

            template.bad_request()
        }
        // Backend failures are kept in the view's alert
        _ => render(&template, &headers, api, shopping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_reads_parallel_lists() {
        let input = ShoppingListFormInput {
            item_name: vec!["Eggs".to_owned(), "Milk".to_owned()],
            item_quantity: vec!["2".to_owned(), String::new()],
            item_unit: vec![String::new(), "l".to_owned()],
            item_purchased: vec!["true".to_owned(), "false".to_owned()],
            ..Default::default()
        };

        let items = input.items().unwrap();
        assert!(items[0].purchased);
        assert_eq!(items[1].line(), "Milk");
        assert!(!input.is_editing());
    }

    #[test]
    fn test_items_rejects_misaligned_lists() {
        let input = ShoppingListFormInput {
            item_name: vec!["Eggs".to_owned()],
            ..Default::default()
        };

        assert!(input.items().is_none());
    }
}

use axum::http::StatusCode;
use mealplanner_shared::{
    mealplan::MealPlanInput,
    shopping::{ShoppingList, ShoppingListItem},
    testing::MemoryBackend,
};

mod helpers;

use helpers::BASE;

/// Seeded backend with a plan holding the omelette, and the plan's id.
fn backend_with_plan() -> anyhow::Result<(MemoryBackend, String)> {
    let backend = MemoryBackend::seeded();
    let omelette = helpers::recipe_id(&backend, "Simple Omelette")?;
    let meal_plan = backend.insert_meal_plan(MealPlanInput {
        name: "Breakfast".to_owned(),
        description: None,
        recipe_ids: vec![omelette],
    });

    Ok((backend, meal_plan.id))
}

fn saved_list(meal_plan_id: &str) -> ShoppingList {
    let item = |name: &str, quantity: &str, unit: &str| ShoppingListItem {
        name: name.to_owned(),
        quantity: Some(quantity.to_owned()),
        unit: Some(unit.to_owned()),
        purchased: false,
    };

    ShoppingList {
        id: "sl1".to_owned(),
        meal_plan_id: Some(meal_plan_id.to_owned()),
        name: "Shopping List for Breakfast".to_owned(),
        items: vec![item("Eggs", "2", ""), item("Cheese", "0.25", "cup")],
    }
}

#[tokio::test]
async fn test_generate_replaces_absent_state() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;

    let detail = helpers::get(&backend, &format!("{BASE}/meal-plans/{id}")).await?;
    assert!(detail.body.contains("Generate Shopping List"));
    assert!(detail.body.contains("hx-target=\"#shopping-list\""));

    backend.clear_requests();
    let page = helpers::hx_post(
        &backend,
        &format!("{BASE}/meal-plans/{id}/shopping-list/generate"),
        &[],
    )
    .await?;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.starts_with("<section id=\"shopping-list\">"));
    assert!(!page.body.contains("Generate Shopping List"));
    assert!(page.body.contains("2 Eggs"));
    assert!(page.body.contains("0.25 cup Cheese"));
    assert!(page.body.contains(&format!("/meal-plans/{id}/shopping-list/pdf")));

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/api/shopping-lists");

    Ok(())
}

#[tokio::test]
async fn test_generate_keeps_existing_list() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;
    backend.insert_shopping_list(saved_list(&id));

    let page = helpers::post(
        &backend,
        &format!("{BASE}/meal-plans/{id}/shopping-list/generate"),
        &[],
    )
    .await?;

    assert!(page.body.contains("Back to meal plan"));
    assert!(page.body.contains("Shopping List for Breakfast"));
    assert!(backend.writes().is_empty());
    assert_eq!(backend.shopping_lists().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_toggle_issues_no_request() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;
    let saved = serde_json::to_string(&saved_list(&id))?;
    backend.clear_requests();

    let page = helpers::hx_post(
        &backend,
        &format!("{BASE}/meal-plans/{id}/shopping-list"),
        &[
            ("saved", saved.as_str()),
            ("mode", "read"),
            ("item_name", "Eggs"),
            ("item_quantity", "2"),
            ("item_unit", ""),
            ("item_purchased", "false"),
            ("item_name", "Cheese"),
            ("item_quantity", "0.25"),
            ("item_unit", "cup"),
            ("item_purchased", "false"),
            ("action", "toggle:1"),
        ],
    )
    .await?;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<s class=\"purchased\">0.25 cup Cheese</s>"));
    assert!(!page.body.contains("<s class=\"purchased\">2 Eggs</s>"));
    assert!(backend.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_edit_then_save() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;
    backend.insert_shopping_list(saved_list(&id));
    let saved = serde_json::to_string(&saved_list(&id))?;
    let path = format!("{BASE}/meal-plans/{id}/shopping-list");

    let page = helpers::hx_post(
        &backend,
        &path,
        &[
            ("saved", saved.as_str()),
            ("mode", "read"),
            ("item_name", "Eggs"),
            ("item_quantity", "2"),
            ("item_unit", ""),
            ("item_purchased", "true"),
            ("action", "edit"),
        ],
    )
    .await?;
    assert!(page.body.contains("name=\"mode\" value=\"edit\""));
    assert!(page.body.contains("value=\"save\""));
    assert!(backend.requests().is_empty());

    let page = helpers::hx_post(
        &backend,
        &path,
        &[
            ("saved", saved.as_str()),
            ("mode", "edit"),
            ("item_name", "Eggs"),
            ("item_quantity", "6"),
            ("item_unit", ""),
            ("item_purchased", "true"),
            ("item_name", ""),
            ("item_quantity", ""),
            ("item_unit", ""),
            ("item_purchased", "false"),
            ("action", "save"),
        ],
    )
    .await?;

    assert!(page.body.contains("Shopping list saved successfully!"));
    assert!(page.body.contains("name=\"mode\" value=\"read\""));

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, "PUT");
    assert_eq!(writes[0].path, "/api/shopping-lists/sl1");

    let stored = backend.shopping_lists().remove(0);
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].quantity.as_deref(), Some("6"));
    assert!(stored.items[0].purchased);

    Ok(())
}

#[tokio::test]
async fn test_cancel_discards_edits() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;
    let saved = serde_json::to_string(&saved_list(&id))?;

    let page = helpers::hx_post(
        &backend,
        &format!("{BASE}/meal-plans/{id}/shopping-list"),
        &[
            ("saved", saved.as_str()),
            ("mode", "edit"),
            ("item_name", "Bread"),
            ("item_quantity", "1"),
            ("item_unit", "loaf"),
            ("item_purchased", "false"),
            ("action", "cancel"),
        ],
    )
    .await?;

    assert!(page.body.contains("2 Eggs"));
    assert!(!page.body.contains("Bread"));
    assert!(backend.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_save_failure_keeps_edits() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;
    let saved = serde_json::to_string(&saved_list(&id))?;
    backend.fail_with(500, Some("disk full"));

    let page = helpers::hx_post(
        &backend,
        &format!("{BASE}/meal-plans/{id}/shopping-list"),
        &[
            ("saved", saved.as_str()),
            ("mode", "edit"),
            ("item_name", "Bread"),
            ("item_quantity", "1"),
            ("item_unit", "loaf"),
            ("item_purchased", "false"),
            ("action", "save"),
        ],
    )
    .await?;

    assert!(page.body.contains("Error saving shopping list: disk full"));
    assert!(page.body.contains("value=\"Bread\""));
    assert!(page.body.contains("name=\"mode\" value=\"edit\""));

    Ok(())
}

#[tokio::test]
async fn test_out_of_sequence_actions_are_rejected() -> anyhow::Result<()> {
    let (backend, id) = backend_with_plan()?;
    let path = format!("{BASE}/meal-plans/{id}/shopping-list");
    let saved = serde_json::to_string(&saved_list(&id))?;
    let foreign = serde_json::to_string(&saved_list("other"))?;

    let toggle_while_editing = [("saved", saved.as_str()), ("mode", "edit"), ("action", "toggle:0")];
    let page = helpers::hx_post(&backend, &path, &toggle_while_editing).await?;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);

    let foreign_list = [("saved", foreign.as_str()), ("mode", "read"), ("action", "edit")];
    let page = helpers::hx_post(&backend, &path, &foreign_list).await?;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);

    let no_snapshot = [("mode", "read"), ("action", "edit")];
    let page = helpers::hx_post(&backend, &path, &no_snapshot).await?;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);

    assert!(backend.writes().is_empty());

    Ok(())
}

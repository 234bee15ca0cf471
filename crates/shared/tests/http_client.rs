use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use mealplanner_shared::{
    Api, Error, HttpApi,
    recipe::{Ingredient, RecipeInput},
    shopping::{GenerateInput, ShoppingListInput, ShoppingListItem},
};
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

async fn list_recipes() -> impl IntoResponse {
    Json(json!([
        {
            "id": "r1",
            "name": "Classic Pancakes",
            "description": "Fluffy, classic pancakes from scratch.",
            "source_url": null,
            "instructions": "Mix and cook.",
            "ingredients": [
                {"name": "Flour", "quantity": 1.5, "unit": "cups"},
                {"name": "Egg", "quantity": 1, "unit": ""}
            ]
        }
    ]))
}

async fn get_recipe(Path(id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("Recipe {id} not found")})),
    )
}

async fn create_recipe(State(seen): State<Seen>, Json(body): Json<Value>) -> impl IntoResponse {
    seen.lock().unwrap().push(("POST /api/recipes".to_owned(), body.clone()));

    if body["name"].as_str().unwrap_or_default().is_empty() {
        return (StatusCode::BAD_REQUEST, "<h1>Bad Request</h1>").into_response();
    }

    let mut recipe = body;
    recipe["id"] = json!("new-id");

    (StatusCode::CREATED, Json(recipe)).into_response()
}

async fn delete_recipe() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

async fn create_shopping_list(
    State(seen): State<Seen>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    seen.lock()
        .unwrap()
        .push(("POST /api/shopping-lists".to_owned(), body.clone()));

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "sl1",
            "meal_plan_id": body["meal_plan_id"],
            "name": "Shopping List for Week",
            "items": [{"name": "Eggs", "quantity": "3", "unit": null}]
        })),
    )
}

async fn update_shopping_list(
    State(seen): State<Seen>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    seen.lock()
        .unwrap()
        .push((format!("PUT /api/shopping-lists/{id}"), body.clone()));

    Json(json!({
        "id": id,
        "meal_plan_id": "mp1",
        "name": body["name"],
        "items": body["items"]
    }))
}

async fn broken_meal_plans() -> impl IntoResponse {
    Json(json!({"not": "a list"}))
}

async fn slow_meal_plan() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;

    Json(json!({"id": "m1", "name": "Week", "description": null, "recipe_ids": []}))
}

async fn spawn_backend() -> anyhow::Result<(String, Seen)> {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route("/api/recipes/{id}", get(get_recipe).delete(delete_recipe))
        .route("/api/meal-plans", get(broken_meal_plans))
        .route("/api/meal-plans/{id}", get(slow_meal_plan))
        .route("/api/shopping-lists", post(create_shopping_list))
        .route("/api/shopping-lists/{id}", put(update_shopping_list))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://{addr}"), seen))
}

#[tokio::test]
async fn test_list_recipes_normalizes_quantities() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    let recipes = api.list_recipes().await?;

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].ingredients[0].line(), "1.5 cups Flour");
    assert_eq!(recipes[0].ingredients[1].line(), "1 Egg");
    assert_eq!(recipes[0].source_url, None);

    Ok(())
}

#[tokio::test]
async fn test_not_found_carries_server_detail() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    let err = api.get_recipe("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Recipe missing not found");

    Ok(())
}

#[tokio::test]
async fn test_create_recipe_posts_json() -> anyhow::Result<()> {
    let (base_url, seen) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    let input = RecipeInput {
        name: "Test Recipe".to_owned(),
        instructions: "Test instructions".to_owned(),
        ingredients: vec![Ingredient {
            name: "Test Ingredient".to_owned(),
            quantity: Some("2".to_owned()),
            unit: Some("cups".to_owned()),
        }],
        ..Default::default()
    };
    let recipe = api.create_recipe(&input).await?;

    assert_eq!(recipe.id, "new-id");
    assert_eq!(recipe.ingredients[0].line(), "2 cups Test Ingredient");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1["ingredients"][0]["quantity"], json!("2"));

    Ok(())
}

#[tokio::test]
async fn test_rejection_without_json_uses_status_reason() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    let err = api.create_recipe(&RecipeInput::default()).await.unwrap_err();

    assert_eq!(err.message(), "400 Bad Request");

    Ok(())
}

#[tokio::test]
async fn test_delete_accepts_no_content() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    api.delete_recipe("r1").await?;

    Ok(())
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    let err = api.list_meal_plans().await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));

    Ok(())
}

#[tokio::test]
async fn test_shopping_list_generate_and_save() -> anyhow::Result<()> {
    let (base_url, seen) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(5))?;

    let list = api
        .create_shopping_list(&GenerateInput {
            meal_plan_id: "mp1".to_owned(),
        })
        .await?;
    assert_eq!(list.meal_plan_id.as_deref(), Some("mp1"));

    let saved = api
        .update_shopping_list(
            &list.id,
            &ShoppingListInput {
                name: list.name.to_owned(),
                items: vec![ShoppingListItem {
                    name: "Eggs".to_owned(),
                    quantity: Some("3".to_owned()),
                    unit: None,
                    purchased: true,
                }],
            },
        )
        .await?;
    assert!(saved.items[0].purchased);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen[0], ("POST /api/shopping-lists".to_owned(), json!({"meal_plan_id": "mp1"})));
    assert_eq!(seen[1].0, "PUT /api/shopping-lists/sl1");
    assert_eq!(seen[1].1["name"], json!("Shopping List for Week"));

    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let api = HttpApi::new(&format!("http://{addr}"), Duration::from_secs(2))?;
    let err = api.list_recipes().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));

    Ok(())
}

#[tokio::test]
async fn test_timeout_is_transport_error() -> anyhow::Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let api = HttpApi::new(&base_url, Duration::from_secs(1))?;

    let err = api.get_meal_plan("m1").await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));

    Ok(())
}

//! In-memory backend for tests.
//!
//! Mirrors the REST backend closely enough for view tests: uuid ids, 400 on
//! missing required fields, 404 on unknown ids, and shopping lists generated by
//! aggregating the plan's ingredients. Every call is recorded so tests can
//! assert which requests a view issued.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::{
    Api, Error, Result,
    mealplan::{MealPlan, MealPlanInput},
    not_found,
    recipe::{Ingredient, Recipe, RecipeInput},
    shopping::{GenerateInput, ShoppingList, ShoppingListInput, ShoppingListItem},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn is_write(&self) -> bool {
        self.method != "GET"
    }
}

#[derive(Default)]
struct Store {
    recipes: Vec<Recipe>,
    meal_plans: Vec<MealPlan>,
    shopping_lists: Vec<ShoppingList>,
    requests: Vec<Request>,
    failure: Option<(u16, Option<String>)>,
}

#[derive(Clone, Default)]
pub struct MemoryBackend(Arc<Mutex<Store>>);

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend holding the two fixture recipes.
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.lock().recipes = fixture_recipes();

        backend
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn writes(&self) -> Vec<Request> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.is_write())
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Makes every following request fail with `status` until cleared.
    pub fn fail_with(&self, status: u16, detail: Option<&str>) {
        self.lock().failure = Some((status, detail.map(str::to_owned)));
    }

    pub fn clear_failure(&self) {
        self.lock().failure = None;
    }

    pub fn insert_recipe(&self, input: RecipeInput) -> Recipe {
        let recipe = recipe_from_input(new_id(), input);
        self.lock().recipes.push(recipe.clone());

        recipe
    }

    pub fn insert_meal_plan(&self, input: MealPlanInput) -> MealPlan {
        let meal_plan = MealPlan {
            id: new_id(),
            name: input.name,
            description: input.description,
            recipe_ids: input.recipe_ids,
        };
        self.lock().meal_plans.push(meal_plan.clone());

        meal_plan
    }

    pub fn insert_shopping_list(&self, list: ShoppingList) -> ShoppingList {
        self.lock().shopping_lists.push(list.clone());

        list
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    pub fn meal_plans(&self) -> Vec<MealPlan> {
        self.lock().meal_plans.clone()
    }

    pub fn shopping_lists(&self) -> Vec<ShoppingList> {
        self.lock().shopping_lists.clone()
    }

    fn record<B: Serialize>(
        &self,
        method: &'static str,
        path: String,
        body: Option<&B>,
    ) -> Result<MutexGuard<'_, Store>> {
        let body = body.map(serde_json::to_value).transpose()?;
        let mut store = self.lock();
        store.requests.push(Request { method, path, body });

        if let Some((status, detail)) = store.failure.clone() {
            return Err(Error::Status { status, detail });
        }

        Ok(store)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn recipe_from_input(id: String, input: RecipeInput) -> Recipe {
    Recipe {
        id,
        name: input.name,
        description: input.description,
        source_url: input.source_url,
        instructions: input.instructions,
        ingredients: input.ingredients,
    }
}

fn bad_request(detail: &str) -> Error {
    Error::Status {
        status: 400,
        detail: Some(detail.to_owned()),
    }
}

fn check_recipe(input: &RecipeInput) -> Result<()> {
    if input.name.is_empty() || input.instructions.is_empty() {
        return Err(bad_request("`name` and `instructions` are required."));
    }

    Ok(())
}

/// Ingredients of every recipe in the plan, merged per name and unit.
/// Numeric quantities are summed, anything else is listed.
fn aggregate(recipes: &[Recipe], meal_plan: &MealPlan) -> Vec<ShoppingListItem> {
    enum Quantity {
        Number(f64),
        Text(Vec<String>),
    }

    let mut merged: Vec<(String, Option<String>, Quantity)> = Vec::new();

    let ingredients = meal_plan
        .recipe_ids
        .iter()
        .filter_map(|id| recipes.iter().find(|r| &r.id == id))
        .flat_map(|r| r.ingredients.iter());

    for Ingredient {
        name,
        quantity,
        unit,
    } in ingredients
    {
        let raw = quantity.clone().unwrap_or_default();
        let numeric = raw.trim().parse::<f64>().ok();

        let Some((_, _, existing)) = merged
            .iter_mut()
            .find(|(n, u, _)| n == name && u == unit)
        else {
            let quantity = match numeric {
                Some(n) => Quantity::Number(n),
                None => Quantity::Text(vec![raw]),
            };
            merged.push((name.to_owned(), unit.to_owned(), quantity));
            continue;
        };

        *existing = match (std::mem::replace(existing, Quantity::Text(vec![])), numeric) {
            (Quantity::Number(total), Some(n)) => Quantity::Number(total + n),
            (Quantity::Number(total), None) => Quantity::Text(vec![total.to_string(), raw]),
            (Quantity::Text(mut values), _) => {
                values.push(raw);
                Quantity::Text(values)
            }
        };
    }

    merged
        .into_iter()
        .map(|(name, unit, quantity)| {
            let quantity = match quantity {
                Quantity::Number(n) => n.to_string(),
                Quantity::Text(values) => values.join(", "),
            };

            ShoppingListItem {
                name,
                quantity: Some(quantity).filter(|q| !q.is_empty()),
                unit,
                purchased: false,
            }
        })
        .collect()
}

fn fixture_recipes() -> Vec<Recipe> {
    let ingredient = |name: &str, quantity: &str, unit: &str| Ingredient {
        name: name.to_owned(),
        quantity: Some(quantity.to_owned()),
        unit: Some(unit.to_owned()),
    };

    vec![
        Recipe {
            id: new_id(),
            name: "Classic Pancakes".to_owned(),
            description: Some("Fluffy, classic pancakes from scratch.".to_owned()),
            source_url: None,
            instructions: "1. Mix dry ingredients. 2. Mix wet ingredients. 3. Combine and cook on a griddle.".to_owned(),
            ingredients: vec![
                ingredient("Flour", "1.5", "cups"),
                ingredient("Sugar", "1", "tbsp"),
                ingredient("Baking Powder", "2", "tsp"),
                ingredient("Salt", "0.5", "tsp"),
                ingredient("Milk", "1.25", "cups"),
                ingredient("Egg", "1", ""),
                ingredient("Butter", "2", "tbsp"),
            ],
        },
        Recipe {
            id: new_id(),
            name: "Simple Omelette".to_owned(),
            description: Some("A quick and easy two-egg omelette.".to_owned()),
            source_url: None,
            instructions: "1. Whisk eggs, water, salt, and pepper. 2. Pour into a heated, oiled pan. 3. Cook until set, then fold.".to_owned(),
            ingredients: vec![
                ingredient("Eggs", "2", ""),
                ingredient("Water", "2", "tbsp"),
                ingredient("Salt", "1", "pinch"),
                ingredient("Pepper", "1", "pinch"),
                ingredient("Cheese", "0.25", "cup"),
            ],
        },
    ]
}

#[async_trait::async_trait]
impl Api for MemoryBackend {
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let store = self.record::<()>("GET", "/api/recipes".to_owned(), None)?;

        Ok(store.recipes.clone())
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        let store = self.record::<()>("GET", format!("/api/recipes/{id}"), None)?;

        match store.recipes.iter().find(|r| r.id == id) {
            Some(recipe) => Ok(recipe.clone()),
            None => not_found!("Recipe"),
        }
    }

    async fn create_recipe(&self, input: &RecipeInput) -> Result<Recipe> {
        let mut store = self.record("POST", "/api/recipes".to_owned(), Some(input))?;
        check_recipe(input)?;

        let recipe = recipe_from_input(new_id(), input.clone());
        store.recipes.push(recipe.clone());

        Ok(recipe)
    }

    async fn update_recipe(&self, id: &str, input: &RecipeInput) -> Result<Recipe> {
        let mut store = self.record("PUT", format!("/api/recipes/{id}"), Some(input))?;
        check_recipe(input)?;

        let Some(recipe) = store.recipes.iter_mut().find(|r| r.id == id) else {
            not_found!("Recipe");
        };
        *recipe = recipe_from_input(id.to_owned(), input.clone());

        Ok(recipe.clone())
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        let mut store = self.record::<()>("DELETE", format!("/api/recipes/{id}"), None)?;

        let before = store.recipes.len();
        store.recipes.retain(|r| r.id != id);
        if store.recipes.len() == before {
            not_found!("Recipe");
        }

        Ok(())
    }

    async fn list_meal_plans(&self) -> Result<Vec<MealPlan>> {
        let store = self.record::<()>("GET", "/api/meal-plans".to_owned(), None)?;

        Ok(store.meal_plans.clone())
    }

    async fn get_meal_plan(&self, id: &str) -> Result<MealPlan> {
        let store = self.record::<()>("GET", format!("/api/meal-plans/{id}"), None)?;

        match store.meal_plans.iter().find(|m| m.id == id) {
            Some(meal_plan) => Ok(meal_plan.clone()),
            None => not_found!("Meal plan"),
        }
    }

    async fn create_meal_plan(&self, input: &MealPlanInput) -> Result<MealPlan> {
        let mut store = self.record("POST", "/api/meal-plans".to_owned(), Some(input))?;
        if input.name.is_empty() {
            return Err(bad_request("Name is required."));
        }

        let meal_plan = MealPlan {
            id: new_id(),
            name: input.name.to_owned(),
            description: input.description.to_owned(),
            recipe_ids: input.recipe_ids.to_owned(),
        };
        store.meal_plans.push(meal_plan.clone());

        Ok(meal_plan)
    }

    async fn update_meal_plan(&self, id: &str, input: &MealPlanInput) -> Result<MealPlan> {
        let mut store = self.record("PUT", format!("/api/meal-plans/{id}"), Some(input))?;

        let Some(meal_plan) = store.meal_plans.iter_mut().find(|m| m.id == id) else {
            not_found!("Meal plan");
        };
        meal_plan.name = input.name.to_owned();
        meal_plan.description = input.description.to_owned();
        meal_plan.recipe_ids = input.recipe_ids.to_owned();

        Ok(meal_plan.clone())
    }

    async fn delete_meal_plan(&self, id: &str) -> Result<()> {
        let mut store = self.record::<()>("DELETE", format!("/api/meal-plans/{id}"), None)?;

        let before = store.meal_plans.len();
        store.meal_plans.retain(|m| m.id != id);
        if store.meal_plans.len() == before {
            not_found!("Meal plan");
        }

        Ok(())
    }

    async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>> {
        let store = self.record::<()>("GET", "/api/shopping-lists".to_owned(), None)?;

        Ok(store.shopping_lists.clone())
    }

    async fn create_shopping_list(&self, input: &GenerateInput) -> Result<ShoppingList> {
        let mut store = self.record("POST", "/api/shopping-lists".to_owned(), Some(input))?;
        if input.meal_plan_id.is_empty() {
            return Err(bad_request("meal_plan_id is required."));
        }

        let Some(meal_plan) = store
            .meal_plans
            .iter()
            .find(|m| m.id == input.meal_plan_id)
            .cloned()
        else {
            not_found!("Meal plan");
        };

        let list = ShoppingList {
            id: new_id(),
            meal_plan_id: Some(meal_plan.id.to_owned()),
            name: format!("Shopping List for {}", meal_plan.name),
            items: aggregate(&store.recipes, &meal_plan),
        };
        store.shopping_lists.push(list.clone());

        Ok(list)
    }

    async fn update_shopping_list(
        &self,
        id: &str,
        input: &ShoppingListInput,
    ) -> Result<ShoppingList> {
        let mut store = self.record("PUT", format!("/api/shopping-lists/{id}"), Some(input))?;

        let Some(list) = store.shopping_lists.iter_mut().find(|l| l.id == id) else {
            not_found!("Shopping list");
        };
        list.name = input.name.to_owned();
        list.items = input.items.to_owned();

        Ok(list.clone())
    }

    async fn seed(&self) -> Result<()> {
        let mut store = self.record::<()>("POST", "/api/test/seed-db".to_owned(), None)?;
        store.recipes = fixture_recipes();
        store.meal_plans.clear();
        store.shopping_lists.clear();

        Ok(())
    }

    fn shopping_list_pdf_url(&self, meal_plan_id: &str) -> String {
        format!("/meal-plans/{meal_plan_id}/shopping-list/pdf")
    }
}

use mealplanner_shared::{
    Api, Load, Result, Route, RowKey, Rows, not_blank,
    recipe::{Ingredient, Recipe, RecipeInput},
};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientRow {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl IngredientRow {
    fn to_ingredient(&self) -> Option<Ingredient> {
        if self.name.trim().is_empty() {
            return None;
        }

        Some(Ingredient {
            name: self.name.to_owned(),
            quantity: optional(&self.quantity),
            unit: optional(&self.unit),
        })
    }
}

impl From<Ingredient> for IngredientRow {
    fn from(value: Ingredient) -> Self {
        Self {
            name: value.name,
            quantity: value.quantity.unwrap_or_default(),
            unit: value.unit.unwrap_or_default(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    Some(value.to_owned()).filter(|v| !v.trim().is_empty())
}

/// Unsaved recipe being edited. Never sent until submitted.
#[derive(Debug, Clone, Validate)]
pub struct RecipeDraft {
    #[validate(custom(
        function = "not_blank",
        message = "Recipe name and instructions are required."
    ))]
    pub name: String,
    pub description: String,
    pub source_url: String,
    #[validate(custom(
        function = "not_blank",
        message = "Recipe name and instructions are required."
    ))]
    pub instructions: String,
    pub ingredients: Rows<IngredientRow>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            source_url: String::new(),
            instructions: String::new(),
            ingredients: Rows::from_iter([IngredientRow::default()]),
        }
    }
}

impl RecipeDraft {
    pub fn from_recipe(recipe: Recipe) -> Self {
        let mut ingredients: Rows<IngredientRow> = recipe
            .ingredients
            .into_iter()
            .map(IngredientRow::from)
            .collect();

        if ingredients.is_empty() {
            ingredients.push(IngredientRow::default());
        }

        Self {
            name: recipe.name,
            description: recipe.description.unwrap_or_default(),
            source_url: recipe.source_url.unwrap_or_default(),
            instructions: recipe.instructions,
            ingredients,
        }
    }

    pub fn add_ingredient(&mut self) -> RowKey {
        self.ingredients.push(IngredientRow::default())
    }

    pub fn can_remove_ingredient(&self) -> bool {
        self.ingredients.len() > 1
    }

    /// Removes a row unless it is the last one.
    pub fn remove_ingredient(&mut self, key: RowKey) -> bool {
        if !self.can_remove_ingredient() {
            return false;
        }

        self.ingredients.remove(key).is_some()
    }

    pub fn ingredient_mut(&mut self, key: RowKey) -> Option<&mut IngredientRow> {
        self.ingredients.get_mut(key)
    }

    /// Payload for submission. Rows without a name are dropped.
    pub fn to_input(&self) -> Result<RecipeInput> {
        self.validate()?;

        Ok(RecipeInput {
            name: self.name.to_owned(),
            description: optional(&self.description),
            source_url: optional(&self.source_url),
            instructions: self.instructions.to_owned(),
            ingredients: self
                .ingredients
                .values()
                .filter_map(IngredientRow::to_ingredient)
                .collect(),
        })
    }
}

/// Create or edit form for a recipe.
#[derive(Debug, Default)]
pub struct RecipeForm {
    pub id: Option<String>,
    pub state: Load<RecipeDraft>,
    pub alert: Option<String>,
}

impl RecipeForm {
    pub fn create() -> Self {
        Self {
            id: None,
            state: Load::Ready(RecipeDraft::default()),
            alert: None,
        }
    }

    pub async fn edit(api: &dyn Api, id: &str) -> Self {
        let state = match api.get_recipe(id).await {
            Ok(recipe) => Load::Ready(RecipeDraft::from_recipe(recipe)),
            Err(err) => {
                tracing::error!(recipe = id, err = %err, "Failed to load recipe form");
                Load::Error(err.message())
            }
        };

        Self {
            id: Some(id.to_owned()),
            state,
            alert: None,
        }
    }

    /// Picks a draft back up after a round-trip through the page.
    pub fn resume(id: Option<String>, draft: RecipeDraft) -> Self {
        Self {
            id,
            state: Load::Ready(draft),
            alert: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Recipe"
        } else {
            "Create New Recipe"
        }
    }

    pub fn draft(&self) -> Option<&RecipeDraft> {
        self.state.ready()
    }

    pub fn draft_mut(&mut self) -> Option<&mut RecipeDraft> {
        self.state.ready_mut()
    }

    pub fn cancel_route(&self) -> Route {
        match &self.id {
            Some(id) => Route::Recipe(id.to_owned()),
            None => Route::Recipes,
        }
    }

    /// Validates then creates or updates the recipe.
    ///
    /// Returns the detail route of the saved recipe. On failure the draft is
    /// kept and `alert` is set.
    pub async fn submit(&mut self, api: &dyn Api) -> Option<Route> {
        let draft = self.state.ready()?;

        let input = match draft.to_input() {
            Ok(input) => input,
            Err(err) => {
                self.alert = Some(err.message());
                return None;
            }
        };

        let result = match &self.id {
            Some(id) => api.update_recipe(id, &input).await,
            None => api.create_recipe(&input).await,
        };

        match result {
            Ok(recipe) => {
                tracing::info!(recipe = recipe.id, "Recipe saved");
                self.alert = None;

                Some(Route::Recipe(recipe.id))
            }
            Err(err) => {
                tracing::error!(recipe = ?self.id, err = %err, "Failed to save recipe");
                self.alert = Some(format!("Error saving recipe: {}", err.message()));

                None
            }
        }
    }
}

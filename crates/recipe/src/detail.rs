use mealplanner_shared::{Api, Load, Result, Route, recipe::Recipe};

#[derive(Debug, Default)]
pub struct RecipeDetail {
    pub id: String,
    pub state: Load<Recipe>,
    /// Blocking alert left by a failed delete.
    pub alert: Option<String>,
}

impl RecipeDetail {
    pub async fn load(api: &dyn Api, id: &str) -> Self {
        let state = match api.get_recipe(id).await {
            Ok(recipe) => Load::Ready(recipe),
            Err(err) => {
                tracing::error!(recipe = id, err = %err, "Failed to load recipe");
                Load::Error(err.message())
            }
        };

        Self {
            id: id.to_owned(),
            state,
            alert: None,
        }
    }

    /// Question asked before the recipe is deleted.
    pub fn confirm_message(&self) -> Option<String> {
        self.state.ready().map(|recipe| {
            format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                recipe.name
            )
        })
    }

    /// Deletes the recipe once the user confirmed. Navigates back to the list.
    pub async fn delete(api: &dyn Api, id: &str) -> Result<Route> {
        api.delete_recipe(id).await.inspect_err(|err| {
            tracing::error!(recipe = id, err = %err, "Failed to delete recipe");
        })?;

        tracing::info!(recipe = id, "Recipe deleted");

        Ok(Route::Recipes)
    }

    pub fn with_delete_error(mut self, err: &mealplanner_shared::Error) -> Self {
        self.alert = Some(format!("Error deleting recipe: {}", err.message()));
        self
    }
}

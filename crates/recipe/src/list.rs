use mealplanner_shared::{Api, Load, recipe::Recipe};

/// Every recipe, fetched on mount.
#[derive(Debug, Default)]
pub struct RecipeList {
    pub state: Load<Vec<Recipe>>,
}

impl RecipeList {
    pub async fn load(api: &dyn Api) -> Self {
        let state = match api.list_recipes().await {
            Ok(recipes) => Load::Ready(recipes),
            Err(err) => {
                tracing::error!(err = %err, "Failed to load recipes");
                Load::Error(err.message())
            }
        };

        Self { state }
    }

    pub fn is_empty(&self) -> bool {
        self.state.ready().is_some_and(Vec::is_empty)
    }
}

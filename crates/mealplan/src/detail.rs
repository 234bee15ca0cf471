use futures::future::try_join;
use mealplanner_shared::{Api, Error, Load, Result, Route, mealplan::MealPlan, recipe::Recipe};

pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this meal plan?";

/// A meal plan with the recipes it references, in plan order.
#[derive(Debug, Clone, Default)]
pub struct MealPlanSummary {
    pub meal_plan: MealPlan,
    pub recipes: Vec<Recipe>,
}

impl MealPlanSummary {
    /// Ids without a matching recipe are skipped.
    pub fn new(meal_plan: MealPlan, all_recipes: Vec<Recipe>) -> Self {
        let recipes = meal_plan
            .recipe_ids
            .iter()
            .filter_map(|id| all_recipes.iter().find(|r| &r.id == id))
            .cloned()
            .collect();

        Self { meal_plan, recipes }
    }
}

#[derive(Debug, Default)]
pub struct MealPlanDetail {
    pub id: String,
    pub state: Load<MealPlanSummary>,
    pub alert: Option<String>,
}

impl MealPlanDetail {
    pub async fn load(api: &dyn Api, id: &str) -> Self {
        let state = match try_join(api.get_meal_plan(id), api.list_recipes()).await {
            Ok((meal_plan, recipes)) => Load::Ready(MealPlanSummary::new(meal_plan, recipes)),
            Err(err) => {
                tracing::error!(meal_plan = id, err = %err, "Failed to load meal plan");
                Load::Error(err.message())
            }
        };

        Self {
            id: id.to_owned(),
            state,
            alert: None,
        }
    }

    pub fn confirm_message(&self) -> &'static str {
        DELETE_CONFIRM_MESSAGE
    }

    pub async fn delete(api: &dyn Api, id: &str) -> Result<Route> {
        api.delete_meal_plan(id).await.inspect_err(|err| {
            tracing::error!(meal_plan = id, err = %err, "Failed to delete meal plan");
        })?;

        tracing::info!(meal_plan = id, "Meal plan deleted");

        Ok(Route::MealPlans)
    }

    pub fn with_delete_error(mut self, err: &Error) -> Self {
        self.alert = Some(format!("Error deleting meal plan: {}", err.message()));
        self
    }
}

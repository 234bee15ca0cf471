use mealplanner_shared::{Api, Load, mealplan::MealPlan};

#[derive(Debug, Default)]
pub struct MealPlanList {
    pub state: Load<Vec<MealPlan>>,
}

impl MealPlanList {
    pub async fn load(api: &dyn Api) -> Self {
        let state = match api.list_meal_plans().await {
            Ok(meal_plans) => Load::Ready(meal_plans),
            Err(err) => {
                tracing::error!(err = %err, "Failed to load meal plans");
                Load::Error(err.message())
            }
        };

        Self { state }
    }

    pub fn is_empty(&self) -> bool {
        self.state.ready().is_some_and(Vec::is_empty)
    }
}

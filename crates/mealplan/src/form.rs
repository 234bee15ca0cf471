use futures::future::try_join;
use mealplanner_shared::{
    Api, Load, Result, Route,
    mealplan::{MealPlan, MealPlanInput},
    not_blank,
    recipe::Recipe,
};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MealPlanDraft {
    #[validate(custom(function = "not_blank", message = "Meal plan name is required."))]
    pub name: String,
    pub description: String,
    pub recipe_ids: Vec<String>,
}

impl MealPlanDraft {
    pub fn from_meal_plan(meal_plan: MealPlan) -> Self {
        Self {
            name: meal_plan.name,
            description: meal_plan.description.unwrap_or_default(),
            recipe_ids: meal_plan.recipe_ids,
        }
    }

    pub fn has_recipe(&self, id: &str) -> bool {
        self.recipe_ids.iter().any(|r| r == id)
    }

    /// Adds the recipe to the plan, or takes it out when already there.
    pub fn toggle_recipe(&mut self, id: &str) {
        if self.has_recipe(id) {
            self.recipe_ids.retain(|r| r != id);
        } else {
            self.recipe_ids.push(id.to_owned());
        }
    }

    pub fn to_input(&self) -> Result<MealPlanInput> {
        self.validate()?;

        Ok(MealPlanInput {
            name: self.name.to_owned(),
            description: Some(self.description.to_owned()).filter(|d| !d.trim().is_empty()),
            recipe_ids: self.recipe_ids.to_owned(),
        })
    }
}

/// A recipe the plan may reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeOption {
    pub id: String,
    pub name: String,
}

impl From<Recipe> for RecipeOption {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MealPlanEditor {
    pub draft: MealPlanDraft,
    pub options: Vec<RecipeOption>,
}

impl MealPlanEditor {
    /// Recipe ids held by the plan with no matching choice, kept as they are.
    pub fn unlisted_ids(&self) -> Vec<&str> {
        self.draft
            .recipe_ids
            .iter()
            .filter(|id| !self.options.iter().any(|option| &option.id == *id))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MealPlanForm {
    pub id: Option<String>,
    pub state: Load<MealPlanEditor>,
    pub alert: Option<String>,
}

fn options(recipes: Vec<Recipe>) -> Vec<RecipeOption> {
    recipes.into_iter().map(RecipeOption::from).collect()
}

impl MealPlanForm {
    pub async fn create(api: &dyn Api) -> Self {
        let state = match api.list_recipes().await {
            Ok(recipes) => Load::Ready(MealPlanEditor {
                draft: MealPlanDraft::default(),
                options: options(recipes),
            }),
            Err(err) => {
                tracing::error!(err = %err, "Failed to load meal plan form");
                Load::Error(err.message())
            }
        };

        Self {
            id: None,
            state,
            alert: None,
        }
    }

    /// Loads the plan and the recipe choices together. Either failing fails the form.
    pub async fn edit(api: &dyn Api, id: &str) -> Self {
        let state = match try_join(api.get_meal_plan(id), api.list_recipes()).await {
            Ok((meal_plan, recipes)) => Load::Ready(MealPlanEditor {
                draft: MealPlanDraft::from_meal_plan(meal_plan),
                options: options(recipes),
            }),
            Err(err) => {
                tracing::error!(meal_plan = id, err = %err, "Failed to load meal plan form");
                Load::Error(err.message())
            }
        };

        Self {
            id: Some(id.to_owned()),
            state,
            alert: None,
        }
    }

    pub fn resume(id: Option<String>, editor: MealPlanEditor) -> Self {
        Self {
            id,
            state: Load::Ready(editor),
            alert: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Meal Plan"
        } else {
            "Create Meal Plan"
        }
    }

    pub fn editor(&self) -> Option<&MealPlanEditor> {
        self.state.ready()
    }

    pub fn editor_mut(&mut self) -> Option<&mut MealPlanEditor> {
        self.state.ready_mut()
    }

    pub fn cancel_route(&self) -> Route {
        match &self.id {
            Some(id) => Route::MealPlan(id.to_owned()),
            None => Route::MealPlans,
        }
    }

    pub async fn submit(&mut self, api: &dyn Api) -> Option<Route> {
        let editor = self.state.ready()?;

        let input = match editor.draft.to_input() {
            Ok(input) => input,
            Err(err) => {
                self.alert = Some(err.message());
                return None;
            }
        };

        let result = match &self.id {
            Some(id) => api.update_meal_plan(id, &input).await,
            None => api.create_meal_plan(&input).await,
        };

        match result {
            Ok(meal_plan) => {
                tracing::info!(meal_plan = meal_plan.id, "Meal plan saved");
                self.alert = None;

                Some(Route::MealPlan(meal_plan.id))
            }
            Err(err) => {
                tracing::error!(meal_plan = ?self.id, err = %err, "Failed to save meal plan");
                self.alert = Some(format!("Error saving meal plan: {}", err.message()));

                None
            }
        }
    }
}

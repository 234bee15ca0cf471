use crate::{
    Result,
    mealplan::{MealPlan, MealPlanInput},
    recipe::{Recipe, RecipeInput},
    shopping::{GenerateInput, ShoppingList, ShoppingListInput},
};

/// REST backend seen from the views.
///
/// Every call is a single request. Dropping the returned future aborts it.
#[async_trait::async_trait]
pub trait Api: Send + Sync {
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;
    async fn get_recipe(&self, id: &str) -> Result<Recipe>;
    async fn create_recipe(&self, input: &RecipeInput) -> Result<Recipe>;
    async fn update_recipe(&self, id: &str, input: &RecipeInput) -> Result<Recipe>;
    async fn delete_recipe(&self, id: &str) -> Result<()>;

    async fn list_meal_plans(&self) -> Result<Vec<MealPlan>>;
    async fn get_meal_plan(&self, id: &str) -> Result<MealPlan>;
    async fn create_meal_plan(&self, input: &MealPlanInput) -> Result<MealPlan>;
    async fn update_meal_plan(&self, id: &str, input: &MealPlanInput) -> Result<MealPlan>;
    async fn delete_meal_plan(&self, id: &str) -> Result<()>;

    async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>>;
    async fn create_shopping_list(&self, input: &GenerateInput) -> Result<ShoppingList>;
    async fn update_shopping_list(
        &self,
        id: &str,
        input: &ShoppingListInput,
    ) -> Result<ShoppingList>;

    /// Resets the backend to its fixture data.
    async fn seed(&self) -> Result<()>;

    /// Link to the backend-rendered PDF of a meal plan's shopping list. Never fetched.
    fn shopping_list_pdf_url(&self, meal_plan_id: &str) -> String;
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

impl MealPlan {
    pub fn description_text(&self) -> Option<&str> {
        crate::recipe::non_blank(self.description.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MealPlanInput {
    pub name: String,
    pub description: Option<String>,
    pub recipe_ids: Vec<String>,
}

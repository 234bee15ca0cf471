use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ShoppingListItem {
    pub name: String,
    #[serde(default, deserialize_with = "crate::quantity::deserialize")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub purchased: bool,
}

impl ShoppingListItem {
    pub fn line(&self) -> String {
        crate::display_line(self.quantity.as_deref(), self.unit.as_deref(), &self.name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    pub id: String,
    #[serde(default)]
    pub meal_plan_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn belongs_to(&self, meal_plan_id: &str) -> bool {
        self.meal_plan_id.as_deref() == Some(meal_plan_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerateInput {
    pub meal_plan_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ShoppingListInput {
    pub name: String,
    pub items: Vec<ShoppingListItem>,
}

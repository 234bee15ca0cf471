use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "crate::quantity::deserialize")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn line(&self) -> String {
        crate::display_line(self.quantity.as_deref(), self.unit.as_deref(), &self.name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn source_url_text(&self) -> Option<&str> {
        non_blank(self.source_url.as_deref())
    }
}

/// Create and update payload: a full replacement of the recipe.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RecipeInput {
    pub name: String,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

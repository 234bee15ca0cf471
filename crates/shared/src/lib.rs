mod api;
mod error;
mod http;
pub mod mealplan;
pub mod recipe;
mod route;
mod rows;
pub mod shopping;
#[cfg(feature = "testing")]
pub mod testing;
mod validate;
mod view;

pub use api::*;
pub use error::*;
pub use http::*;
pub use route::*;
pub use rows::*;
pub use validate::*;
pub use view::*;

/// Renders an ingredient or shopping item the same way everywhere:
/// `"{quantity} {unit} {name}"`, `"{quantity} {name}"` or `"{name}"`.
///
/// Blank quantity or unit count as absent. A unit without a quantity is not shown.
pub fn display_line(quantity: Option<&str>, unit: Option<&str>, name: &str) -> String {
    let quantity = quantity.map(str::trim).filter(|q| !q.is_empty());
    let unit = unit.map(str::trim).filter(|u| !u.is_empty());

    match (quantity, unit) {
        (Some(quantity), Some(unit)) => format!("{quantity} {unit} {name}"),
        (Some(quantity), None) => format!("{quantity} {name}"),
        _ => name.to_owned(),
    }
}

pub(crate) mod quantity {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    /// Accepts a JSON string, number or null.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => None,
            Some(Raw::Text(value)) => Some(value),
            Some(Raw::Int(value)) => Some(value.to_string()),
            Some(Raw::Float(value)) => Some(value.to_string()),
        })
    }
}

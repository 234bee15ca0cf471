use mealplanner_shared::{Rows, display_line, shopping::ShoppingList, shopping::ShoppingListItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRow {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub purchased: bool,
}

impl ItemRow {
    pub fn line(&self) -> String {
        display_line(Some(&self.quantity), Some(&self.unit), &self.name)
    }

    pub(crate) fn to_item(&self) -> Option<ShoppingListItem> {
        if self.name.trim().is_empty() {
            return None;
        }

        let optional = |value: &str| Some(value.to_owned()).filter(|v| !v.trim().is_empty());

        Some(ShoppingListItem {
            name: self.name.to_owned(),
            quantity: optional(&self.quantity),
            unit: optional(&self.unit),
            purchased: self.purchased,
        })
    }
}

impl From<ShoppingListItem> for ItemRow {
    fn from(value: ShoppingListItem) -> Self {
        Self {
            name: value.name,
            quantity: value.quantity.unwrap_or_default(),
            unit: value.unit.unwrap_or_default(),
            purchased: value.purchased,
        }
    }
}

/// Last list fetched from the backend and the local copy of its items.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub saved: ShoppingList,
    pub items: Rows<ItemRow>,
}

impl Session {
    pub fn new(saved: ShoppingList, items: impl IntoIterator<Item = ItemRow>) -> Self {
        Self {
            saved,
            items: items.into_iter().collect(),
        }
    }
}

impl From<ShoppingList> for Session {
    fn from(saved: ShoppingList) -> Self {
        let items: Vec<ItemRow> = saved.items.iter().cloned().map(ItemRow::from).collect();

        Self::new(saved, items)
    }
}

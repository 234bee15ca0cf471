use std::mem;

use mealplanner_shared::{
    Api, Error, Result, RowKey,
    shopping::{GenerateInput, ShoppingList, ShoppingListInput},
};

use crate::{ItemRow, Session};

pub const SAVED_MESSAGE: &str = "Shopping list saved successfully!";

/// Backend call a failed state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    Load,
    Generate,
}

/// `Unloaded -> Loading -> Absent | Loaded | Failed`, `Absent -> Loading` on
/// generate, `Loaded <-> Editing` on edit, save and cancel.
#[derive(Debug, Clone, Default)]
pub enum ShoppingListState {
    #[default]
    Unloaded,
    Loading,
    Failed { fetch: Fetch, message: String },
    Absent,
    Loaded(Session),
    Editing(Session),
}

/// Shopping list of one meal plan.
#[derive(Debug, Clone)]
pub struct ShoppingListView {
    pub meal_plan_id: String,
    pub state: ShoppingListState,
    pub alert: Option<String>,
    pub notice: Option<String>,
}

impl ShoppingListView {
    pub fn new(meal_plan_id: impl Into<String>) -> Self {
        Self {
            meal_plan_id: meal_plan_id.into(),
            state: ShoppingListState::Unloaded,
            alert: None,
            notice: None,
        }
    }

    /// Rebuilds a loaded view from the last fetched list and the local items.
    pub fn resume(
        meal_plan_id: impl Into<String>,
        saved: ShoppingList,
        items: Vec<ItemRow>,
        editing: bool,
    ) -> Result<Self> {
        let mut view = Self::new(meal_plan_id);
        if !saved.belongs_to(&view.meal_plan_id) {
            return Err(Error::InvalidState(
                "shopping list belongs to another meal plan",
            ));
        }

        let session = Session::new(saved, items);
        view.state = if editing {
            ShoppingListState::Editing(session)
        } else {
            ShoppingListState::Loaded(session)
        };

        Ok(view)
    }

    /// Fetches every list and keeps the first one tied to this meal plan.
    pub async fn load(&mut self, api: &dyn Api) {
        self.state = ShoppingListState::Loading;

        self.state = match api.list_shopping_lists().await {
            Ok(lists) => {
                let mut matching = lists
                    .into_iter()
                    .filter(|list| list.belongs_to(&self.meal_plan_id));
                let found = matching.next();
                let extra = matching.count();

                if extra > 0 {
                    tracing::warn!(
                        meal_plan = self.meal_plan_id,
                        count = extra + 1,
                        "Several shopping lists for one meal plan, using the first"
                    );
                }

                match found {
                    Some(list) => ShoppingListState::Loaded(Session::from(list)),
                    None => ShoppingListState::Absent,
                }
            }
            Err(err) => {
                tracing::error!(meal_plan = self.meal_plan_id, err = %err, "Failed to load shopping list");
                ShoppingListState::Failed {
                    fetch: Fetch::Load,
                    message: err.message(),
                }
            }
        };
    }

    pub async fn generate(&mut self, api: &dyn Api) -> Result<()> {
        if !self.is_absent() {
            return Err(Error::InvalidState(
                "a shopping list already exists for this meal plan",
            ));
        }

        self.state = ShoppingListState::Loading;
        let input = GenerateInput {
            meal_plan_id: self.meal_plan_id.to_owned(),
        };

        match api.create_shopping_list(&input).await {
            Ok(list) => {
                tracing::info!(meal_plan = self.meal_plan_id, shopping_list = list.id, "Shopping list generated");
                self.state = ShoppingListState::Loaded(Session::from(list));

                Ok(())
            }
            Err(err) => {
                tracing::error!(meal_plan = self.meal_plan_id, err = %err, "Failed to generate shopping list");
                self.state = ShoppingListState::Failed {
                    fetch: Fetch::Generate,
                    message: err.message(),
                };

                Err(err)
            }
        }
    }

    /// Flips an item's purchased flag locally. Only in read mode.
    pub fn toggle_purchased(&mut self, key: RowKey) -> Result<()> {
        let ShoppingListState::Loaded(session) = &mut self.state else {
            return Err(Error::InvalidState("items can only be ticked in read mode"));
        };

        let item = session
            .items
            .get_mut(key)
            .ok_or(Error::InvalidState("unknown shopping list item"))?;
        item.purchased = !item.purchased;

        Ok(())
    }

    pub fn edit(&mut self) -> Result<()> {
        self.state = match mem::take(&mut self.state) {
            ShoppingListState::Loaded(session) => ShoppingListState::Editing(session),
            other => {
                self.state = other;
                return Err(Error::InvalidState("only a loaded list can be edited"));
            }
        };
        self.notice = None;

        Ok(())
    }

    pub fn add_item(&mut self) -> Result<RowKey> {
        let session = self.editing_mut()?;

        Ok(session.items.push(ItemRow::default()))
    }

    pub fn remove_item(&mut self, key: RowKey) -> Result<()> {
        let session = self.editing_mut()?;
        session
            .items
            .remove(key)
            .ok_or(Error::InvalidState("unknown shopping list item"))?;

        Ok(())
    }

    pub fn item_mut(&mut self, key: RowKey) -> Option<&mut ItemRow> {
        self.editing_mut().ok()?.items.get_mut(key)
    }

    /// Replaces the whole list on the backend. Items without a name are dropped.
    pub async fn save(&mut self, api: &dyn Api) -> Result<()> {
        let session = self.editing_mut()?;
        let id = session.saved.id.to_owned();
        let input = ShoppingListInput {
            name: session.saved.name.to_owned(),
            items: session.items.values().filter_map(ItemRow::to_item).collect(),
        };

        match api.update_shopping_list(&id, &input).await {
            Ok(list) => {
                tracing::info!(shopping_list = id, "Shopping list saved");
                self.state = ShoppingListState::Loaded(Session::from(list));
                self.alert = None;
                self.notice = Some(SAVED_MESSAGE.to_owned());

                Ok(())
            }
            Err(err) => {
                tracing::error!(shopping_list = id, err = %err, "Failed to save shopping list");
                self.alert = Some(format!("Error saving shopping list: {}", err.message()));

                Err(err)
            }
        }
    }

    /// Drops local changes, purchased toggles included.
    pub fn cancel(&mut self) -> Result<()> {
        self.state = match mem::take(&mut self.state) {
            ShoppingListState::Editing(session) => {
                ShoppingListState::Loaded(Session::from(session.saved))
            }
            other => {
                self.state = other;
                return Err(Error::InvalidState("only an edited list can be cancelled"));
            }
        };
        self.alert = None;

        Ok(())
    }

    fn editing_mut(&mut self) -> Result<&mut Session> {
        match &mut self.state {
            ShoppingListState::Editing(session) => Ok(session),
            _ => Err(Error::InvalidState("the list is not being edited")),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            ShoppingListState::Unloaded | ShoppingListState::Loading
        )
    }

    pub fn is_absent(&self) -> bool {
        matches!(self.state, ShoppingListState::Absent)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, ShoppingListState::Editing(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            ShoppingListState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn failure_label(&self) -> &'static str {
        match &self.state {
            ShoppingListState::Failed {
                fetch: Fetch::Generate,
                ..
            } => "Error generating shopping list",
            ShoppingListState::Failed {
                fetch: Fetch::Load, ..
            } => "Error loading shopping list",
            _ => "Error",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ShoppingListState::Loaded(session) | ShoppingListState::Editing(session) => {
                Some(session)
            }
            _ => None,
        }
    }
}

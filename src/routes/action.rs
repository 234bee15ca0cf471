use std::str::FromStr;

/// Value of the `action` button that submitted a page form.
///
/// Row actions carry the row's position on the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Add,
    Remove(usize),
    Toggle(usize),
    Edit,
    Save,
    Cancel,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let action = match value.split_once(':') {
            None => match value {
                // Implicit submission sends no button value
                "" | "submit" => Action::Submit,
                "add" => Action::Add,
                "edit" => Action::Edit,
                "save" => Action::Save,
                "cancel" => Action::Cancel,
                _ => return Err(format!("unknown action `{value}`")),
            },
            Some((name, index)) => {
                let index = index
                    .parse::<usize>()
                    .map_err(|_| format!("invalid row in action `{value}`"))?;

                match name {
                    "remove" => Action::Remove(index),
                    "toggle" => Action::Toggle(index),
                    _ => return Err(format!("unknown action `{value}`")),
                }
            }
        };

        Ok(action)
    }
}

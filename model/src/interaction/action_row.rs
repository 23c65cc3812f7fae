use super::{Component, ComponentType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActionRow {
    pub r#type: ComponentType,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> ActionRow {
        ActionRow {
            r#type: ComponentType::ActionRow,
            components,
        }
    }

    /// Wraps a single component in its own row, as required for select menus and text inputs
    pub fn single(component: impl Into<Component>) -> Component {
        Component::ActionRow(ActionRow::new(vec![component.into()]))
    }
}

use super::ComponentType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectMenu {
    pub r#type: ComponentType,
    pub custom_id: Box<str>,
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<str>>,
    /// 0-25
    #[serde(default = "one")]
    pub min_values: u8,
    /// 1-25
    #[serde(default = "one")]
    pub max_values: u8,
    #[serde(default = "Default::default")]
    pub disabled: bool,
}

impl SelectMenu {
    pub fn new(custom_id: &str, options: Vec<SelectOption>) -> SelectMenu {
        SelectMenu {
            r#type: ComponentType::StringSelect,
            custom_id: Box::from(custom_id),
            options,
            placeholder: None,
            min_values: 1,
            max_values: 1,
            disabled: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> SelectMenu {
        self.placeholder = Some(Box::from(placeholder));
        self
    }

    pub fn values(mut self, min: u8, max: u8) -> SelectMenu {
        self.min_values = min;
        self.max_values = max;
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectOption {
    pub label: Box<str>,
    pub value: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
    #[serde(default)]
    pub default: bool,
}

impl SelectOption {
    pub fn new(label: &str, value: &str) -> SelectOption {
        SelectOption {
            label: Box::from(label),
            value: Box::from(value),
            description: None,
            default: false,
        }
    }
}

fn one() -> u8 {
    1
}

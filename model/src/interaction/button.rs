use super::ComponentType;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Button {
    pub r#type: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<Box<str>>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default = "bool::default")]
    pub disabled: bool,
}

impl Button {
    pub fn new(custom_id: &str, label: &str, style: ButtonStyle) -> Button {
        Button {
            r#type: ComponentType::Button,
            label: Some(Box::from(label)),
            custom_id: Some(Box::from(custom_id)),
            style,
            url: None,
            disabled: false,
        }
    }
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

use super::ComponentType;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputText {
    pub r#type: ComponentType,
    pub custom_id: Box<str>,
    pub style: TextStyleType,
    pub label: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default = "yes")]
    pub required: bool,
}

impl InputText {
    pub fn new(custom_id: &str, label: &str, style: TextStyleType) -> InputText {
        InputText {
            r#type: ComponentType::TextInput,
            custom_id: Box::from(custom_id),
            style,
            label: Box::from(label),
            placeholder: None,
            min_length: None,
            max_length: None,
            required: true,
        }
    }

    pub fn required(mut self, required: bool) -> InputText {
        self.required = required;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum TextStyleType {
    Short = 1,
    Paragraph = 2,
}

fn yes() -> bool {
    true
}

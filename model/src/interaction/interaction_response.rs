use crate::interaction::{Component, InteractionCallbackData};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum InteractionResponse {
    ChannelMessageWithSource(MessageResponse),
    Modal(ModalResponse),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    r#type: InteractionResponseType,
    pub data: InteractionCallbackData,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModalResponse {
    r#type: InteractionResponseType,
    pub data: ModalResponseData,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModalResponseData {
    pub custom_id: Box<str>,
    pub title: Box<str>,
    pub components: Vec<Component>,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredMessageUpdate = 6,
    UpdateMessage = 7,
    ApplicationCommandAutoCompleteResult = 8,
    Modal = 9,
}

impl TryFrom<u64> for InteractionResponseType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Pong,
            4 => Self::ChannelMessageWithSource,
            5 => Self::DeferredChannelMessageWithSource,
            6 => Self::DeferredMessageUpdate,
            7 => Self::UpdateMessage,
            8 => Self::ApplicationCommandAutoCompleteResult,
            9 => Self::Modal,
            _ => {
                return Err(
                    format!("invalid interaction response type \"{}\"", value).into_boxed_str()
                )
            }
        })
    }
}

impl InteractionResponse {
    pub fn new_channel_message_with_source(data: InteractionCallbackData) -> InteractionResponse {
        InteractionResponse::ChannelMessageWithSource(MessageResponse {
            r#type: InteractionResponseType::ChannelMessageWithSource,
            data,
        })
    }

    /// A reply only the invoking user can see
    pub fn new_ephemeral_message(content: impl Into<Box<str>>) -> InteractionResponse {
        Self::new_channel_message_with_source(InteractionCallbackData::ephemeral(content))
    }

    pub fn new_modal(data: ModalResponseData) -> InteractionResponse {
        InteractionResponse::Modal(ModalResponse {
            r#type: InteractionResponseType::Modal,
            data,
        })
    }

    pub fn response_type(&self) -> InteractionResponseType {
        match self {
            InteractionResponse::ChannelMessageWithSource(res) => res.r#type,
            InteractionResponse::Modal(res) => res.r#type,
        }
    }

    /// Text content of a message response, if this is one
    pub fn content(&self) -> Option<&str> {
        match self {
            InteractionResponse::ChannelMessageWithSource(res) => Some(&res.data.content),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for InteractionResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let response_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction response type was not an integer"))
            .and_then(InteractionResponseType::try_from)
            .map_err(D::Error::custom)?;

        let response = match response_type {
            InteractionResponseType::ChannelMessageWithSource => {
                serde_json::from_value(value).map(InteractionResponse::ChannelMessageWithSource)
            }
            InteractionResponseType::Modal => {
                serde_json::from_value(value).map(InteractionResponse::Modal)
            }
            other => return Err(Error::custom(format!("{:?} is not supported", other))),
        }
        .map_err(D::Error::custom)?;

        Ok(response)
    }
}

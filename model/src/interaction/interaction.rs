use crate::channel::message::Message;
use crate::guild::Member;
use crate::interaction::ComponentType;
use crate::user::User;
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Debug)]
#[non_exhaustive]
pub enum Interaction {
    MessageComponent(Box<MessageComponentInteraction>),
    ModalSubmit(Box<ModalSubmitInteraction>),
    /// Pings, slash commands and autocomplete, none of which reach the bot over the gateway
    Other(InteractionType),
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutoComplete = 4,
    ModalSubmit = 5,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutoComplete,
            5 => Self::ModalSubmit,
            _ => return Err(format!("invalid interaction type \"{}\"", value).into_boxed_str()),
        })
    }
}

// ============================================================================
// Message Component Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    #[serde(default)]
    pub message: Option<Message>,
    pub data: MessageComponentInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteractionData {
    pub custom_id: Box<str>,
    pub component_type: ComponentType,
    /// Selected option values, only present for select menus
    #[serde(default)]
    pub values: Vec<Box<str>>,
}

impl MessageComponentInteraction {
    /// Invoking user, whether the interaction happened in a guild or a DM
    pub fn author(&self) -> Option<&User> {
        author(&self.member, &self.user)
    }
}

// ============================================================================
// Modal Submit Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalSubmitInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    #[serde(default)]
    pub message: Option<Message>,
    pub data: ModalInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalInteractionData {
    pub custom_id: Box<str>,
    pub components: Vec<ModalInteractionActionRowData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalInteractionActionRowData {
    pub r#type: ComponentType,
    pub components: Vec<ModalInteractionComponentData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalInteractionComponentData {
    pub r#type: ComponentType,
    pub custom_id: Box<str>,
    #[serde(default)]
    pub value: Box<str>,
}

impl ModalSubmitInteraction {
    pub fn author(&self) -> Option<&User> {
        author(&self.member, &self.user)
    }
}

impl ModalInteractionData {
    /// Submitted value of the text input with the given custom id. Optional inputs left blank
    /// come back as empty strings.
    pub fn value(&self, custom_id: &str) -> Option<&str> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|component| &*component.custom_id == custom_id)
            .map(|component| &*component.value)
    }
}

fn author<'a>(member: &'a Option<Member>, user: &'a Option<User>) -> Option<&'a User> {
    member
        .as_ref()
        .and_then(|member| member.user.as_ref())
        .or(user.as_ref())
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let interaction_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction type was not an integer"))
            .and_then(InteractionType::try_from)
            .map_err(D::Error::custom)?;

        let interaction = match interaction_type {
            InteractionType::MessageComponent => {
                serde_json::from_value(value).map(Interaction::MessageComponent)
            }
            InteractionType::ModalSubmit => {
                serde_json::from_value(value).map(Interaction::ModalSubmit)
            }
            other => Ok(Interaction::Other(other)),
        }
        .map_err(D::Error::custom)?;

        Ok(interaction)
    }
}

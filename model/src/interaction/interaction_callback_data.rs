use crate::channel::message::AllowedMentions;
use crate::interaction::Component;
use serde::{Deserialize, Serialize};

pub struct MessageFlags;

impl MessageFlags {
    /// Only the invoking user can see the message
    pub const EPHEMERAL: u32 = 1 << 6;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    pub content: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(default)]
    pub flags: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl InteractionCallbackData {
    pub fn ephemeral(content: impl Into<Box<str>>) -> InteractionCallbackData {
        InteractionCallbackData {
            tts: None,
            content: content.into(),
            allowed_mentions: Some(AllowedMentions::none()),
            flags: MessageFlags::EPHEMERAL,
            components: Vec::new(),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.flags & MessageFlags::EPHEMERAL == MessageFlags::EPHEMERAL
    }
}

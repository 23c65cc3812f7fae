use serde::{Deserialize, Serialize};

use super::ChannelType;
use crate::channel::ThreadMetadata;
use crate::Snowflake;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Channel {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub guild_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u16>,
    #[serde(default)]
    pub name: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_metadata: Option<ThreadMetadata>,
}

impl Channel {
    /// Link that opens the channel (or thread) in any client
    pub fn url(&self) -> String {
        match self.guild_id {
            Some(guild_id) => format!("https://discord.com/channels/{}/{}", guild_id, self.id),
            None => format!("https://discord.com/channels/@me/{}", self.id),
        }
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

use core::fmt;

use model::interaction::Interaction;

use super::{GuildMemberAdd, Ready};

/// The dispatches the bot acts on. Everything else decodes to [`Event::Unknown`] so that new
/// event types never break the read loop.
#[derive(Debug)]
pub enum Event {
    Ready(Box<Ready>),
    Resumed,
    GuildMemberAdd(Box<GuildMemberAdd>),
    InteractionCreate(Box<Interaction>),
    Unknown(String),
}

impl Event {
    pub fn decode(event_type: &str, data: &str) -> serde_json::Result<Event> {
        Ok(match event_type {
            "READY" => Event::Ready(serde_json::from_str(data)?),
            "RESUMED" => Event::Resumed,
            "GUILD_MEMBER_ADD" => Event::GuildMemberAdd(serde_json::from_str(data)?),
            "INTERACTION_CREATE" => Event::InteractionCreate(serde_json::from_str(data)?),
            other => Event::Unknown(other.to_owned()),
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Ready(_) => write!(f, "READY"),
            Event::Resumed => write!(f, "RESUMED"),
            Event::GuildMemberAdd(_) => write!(f, "GUILD_MEMBER_ADD"),
            Event::InteractionCreate(_) => write!(f, "INTERACTION_CREATE"),
            Event::Unknown(event_type) => write!(f, "{}", event_type),
        }
    }
}

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use model::channel::message::CreateMessage;
use model::channel::{Channel, ChannelType};
use model::guild::Role;
use model::interaction::{InteractionResponse, InteractionResponseType};
use model::user::User;
use model::Snowflake;
use onboarding::tracker::InteractionContext;
use onboarding::validation::FormInput;
use onboarding::{ApplicationTracker, Config, Error, MessagingGateway, Result};
use reqwest::StatusCode;

pub const GUILD_ID: Snowflake = Snowflake(1);
pub const APPLICATIONS_CHANNEL: Snowflake = Snowflake(100);
pub const LOG_CHANNEL: Snowflake = Snowflake(200);

pub const MODERATOR_ROLE: Snowflake = Snowflake(300);
pub const MEMBER_ROLE: Snowflake = Snowflake(301);
pub const CONTENT_ROLE: Snowflake = Snowflake(302);
pub const UNRELATED_ROLE: Snowflake = Snowflake(303);

pub const APPLICANT_ID: Snowflake = Snowflake(10);
pub const MODERATOR_ID: Snowflake = Snowflake(20);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateThread {
        parent_id: Snowflake,
        name: String,
    },
    AddThreadMember {
        thread_id: Snowflake,
        user_id: Snowflake,
    },
    SendMessage {
        channel_id: Snowflake,
        content: String,
        components: usize,
    },
    RenameThread {
        thread_id: Snowflake,
        name: String,
    },
    DirectMessage {
        user_id: Snowflake,
        content: String,
    },
    AddMemberRole {
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    },
    Respond {
        interaction_id: Snowflake,
        response_type: InteractionResponseType,
        content: Option<String>,
        modal_id: Option<String>,
    },
}

/// Stands in for Discord, recording every call the tracker makes
pub struct RecordingGateway {
    calls: Mutex<Vec<Call>>,
    channels: Mutex<HashMap<Snowflake, Channel>>,
    roles: Mutex<Vec<Role>>,
    next_id: AtomicU64,
    pub fail_direct_messages: AtomicBool,
    pub fail_renames: AtomicBool,
    pub fail_role_grants: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> RecordingGateway {
        let channels = [
            channel(APPLICATIONS_CHANNEL, ChannelType::GuildText),
            channel(LOG_CHANNEL, ChannelType::GuildText),
        ]
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

        RecordingGateway {
            calls: Mutex::new(Vec::new()),
            channels: Mutex::new(channels),
            roles: Mutex::new(vec![
                role(MODERATOR_ROLE, "Moderator"),
                role(MEMBER_ROLE, "Member"),
                role(CONTENT_ROLE, "Content Maker"),
                role(UNRELATED_ROLE, "Booster"),
            ]),
            next_id: AtomicU64::new(1000),
            fail_direct_messages: AtomicBool::new(false),
            fail_renames: AtomicBool::new(false),
            fail_role_grants: AtomicBool::new(false),
        }
    }

    pub fn remove_role(&self, role_id: Snowflake) {
        self.roles.lock().unwrap().retain(|role| role.id != role_id);
    }

    /// Position of the first recorded call matching the predicate
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls().iter().position(predicate)
    }

    pub fn remove_channel(&self, channel_id: Snowflake) {
        self.channels.lock().unwrap().remove(&channel_id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Content of every message sent to a channel, in order
    pub fn messages_in(&self, channel_id: Snowflake) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendMessage {
                    channel_id: id,
                    content,
                    ..
                } if id == channel_id => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn granted_roles(&self) -> Vec<Snowflake> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddMemberRole { role_id, .. } => Some(role_id),
                _ => None,
            })
            .collect()
    }

    pub fn responses(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Respond { .. }))
            .collect()
    }

    /// Content of the last ephemeral reply
    pub fn last_reply(&self) -> Option<String> {
        self.responses().into_iter().rev().find_map(|call| match call {
            Call::Respond { content, .. } => content,
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>> {
        Ok(self.channels.lock().unwrap().get(&channel_id).cloned())
    }

    async fn create_thread(&self, parent_id: Snowflake, name: &str) -> Result<Channel> {
        self.record(Call::CreateThread {
            parent_id,
            name: name.to_owned(),
        });

        let id = Snowflake(self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut thread = channel(id, ChannelType::GuildPrivateThread);
        thread.name = Some(Box::from(name));
        thread.parent_id = Some(parent_id);

        self.channels.lock().unwrap().insert(id, thread.clone());
        Ok(thread)
    }

    async fn add_thread_member(&self, thread_id: Snowflake, user_id: Snowflake) -> Result<()> {
        self.record(Call::AddThreadMember { thread_id, user_id });
        Ok(())
    }

    async fn send_message(&self, channel_id: Snowflake, message: CreateMessage) -> Result<()> {
        self.record(Call::SendMessage {
            channel_id,
            content: message.content.to_string(),
            components: message.components.len(),
        });
        Ok(())
    }

    async fn rename_thread(&self, thread_id: Snowflake, name: &str) -> Result<()> {
        if self.fail_renames.load(Ordering::SeqCst) {
            return Err(Error::ResponseError(
                StatusCode::TOO_MANY_REQUESTS,
                "You are being rate limited.".to_owned(),
            ));
        }

        self.record(Call::RenameThread {
            thread_id,
            name: name.to_owned(),
        });
        Ok(())
    }

    async fn direct_message(&self, user_id: Snowflake, content: &str) -> Result<()> {
        if self.fail_direct_messages.load(Ordering::SeqCst) {
            return Err(Error::ResponseError(
                StatusCode::FORBIDDEN,
                "Cannot send messages to this user".to_owned(),
            ));
        }

        self.record(Call::DirectMessage {
            user_id,
            content: content.to_owned(),
        });
        Ok(())
    }

    async fn guild_roles(&self, _guild_id: Snowflake) -> Result<Vec<Role>> {
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn add_member_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> Result<()> {
        if self.fail_role_grants.load(Ordering::SeqCst) {
            return Err(Error::ResponseError(
                StatusCode::FORBIDDEN,
                "Missing Permissions".to_owned(),
            ));
        }

        self.record(Call::AddMemberRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn respond(
        &self,
        interaction_id: Snowflake,
        _token: &str,
        response: InteractionResponse,
    ) -> Result<()> {
        let modal_id = match &response {
            InteractionResponse::Modal(modal) => Some(modal.data.custom_id.to_string()),
            _ => None,
        };

        self.record(Call::Respond {
            interaction_id,
            response_type: response.response_type(),
            content: response.content().map(str::to_owned),
            modal_id,
        });
        Ok(())
    }
}

pub fn channel(id: Snowflake, channel_type: ChannelType) -> Channel {
    Channel {
        id,
        channel_type,
        guild_id: Some(GUILD_ID),
        position: None,
        name: None,
        topic: None,
        owner_id: None,
        parent_id: None,
        thread_metadata: None,
    }
}

pub fn role(id: Snowflake, name: &str) -> Role {
    Role {
        id,
        name: name.to_owned(),
        color: 0,
        hoist: false,
        position: 0,
        managed: false,
        mentionable: false,
    }
}

pub fn config() -> Config {
    Config {
        discord_token: "token".to_owned(),
        applications_channel_id: APPLICATIONS_CHANNEL,
        log_channel_id: LOG_CHANNEL,
        moderator_roles: vec!["Moderator".to_owned(), "Admin".to_owned()],
        member_role_name: "Member".to_owned(),
        content_maker_role_name: "Content Maker".to_owned(),
        sentry_dsn: None,
        json_log: false,
        debug_mode: false,
        metrics_addr: None,
    }
}

pub fn user(id: Snowflake, username: &str) -> User {
    User {
        id,
        username: username.to_owned(),
        global_name: None,
        avatar: None,
        bot: false,
        system: false,
    }
}

pub fn applicant() -> User {
    user(APPLICANT_ID, "alice")
}

pub fn moderator() -> User {
    user(MODERATOR_ID, "mod_bob")
}

static INTERACTION_IDS: AtomicU64 = AtomicU64::new(5000);

pub fn ctx(thread_id: Snowflake, user: User, member_roles: Vec<Snowflake>) -> InteractionContext {
    InteractionContext {
        id: Snowflake(INTERACTION_IDS.fetch_add(1, Ordering::SeqCst)),
        token: "interaction-token".to_owned(),
        guild_id: Some(GUILD_ID),
        channel_id: thread_id,
        user,
        member_roles,
    }
}

pub fn applicant_ctx(thread_id: Snowflake) -> InteractionContext {
    ctx(thread_id, applicant(), vec![])
}

pub fn moderator_ctx(thread_id: Snowflake) -> InteractionContext {
    ctx(thread_id, moderator(), vec![MODERATOR_ROLE])
}

pub fn form(nick: &str, age: &str, contact: &str) -> FormInput {
    FormInput {
        minecraft_nick: nick.to_owned(),
        age: age.to_owned(),
        contact: contact.to_owned(),
        other: String::new(),
    }
}

pub struct Harness {
    pub gateway: Arc<RecordingGateway>,
    pub tracker: Arc<ApplicationTracker<RecordingGateway>>,
}

pub fn harness() -> Harness {
    let gateway = Arc::new(RecordingGateway::new());
    let tracker = Arc::new(ApplicationTracker::new(
        Arc::new(config()),
        Arc::clone(&gateway),
    ));

    Harness { gateway, tracker }
}

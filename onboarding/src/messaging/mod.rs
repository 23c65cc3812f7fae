mod rest;
pub use rest::RestClient;

use async_trait::async_trait;
use model::channel::message::CreateMessage;
use model::channel::Channel;
use model::guild::Role;
use model::interaction::InteractionResponse;
use model::Snowflake;

use crate::Result;

/// Every call the tracker makes to the chat platform goes through here
#[async_trait]
pub trait MessagingGateway: Send + Sync + 'static {
    /// `None` if the channel doesn't exist or the bot can't see it
    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>>;

    /// Opens a private thread under `parent_id`
    async fn create_thread(&self, parent_id: Snowflake, name: &str) -> Result<Channel>;

    async fn add_thread_member(&self, thread_id: Snowflake, user_id: Snowflake) -> Result<()>;

    async fn send_message(&self, channel_id: Snowflake, message: CreateMessage) -> Result<()>;

    async fn rename_thread(&self, thread_id: Snowflake, name: &str) -> Result<()>;

    async fn direct_message(&self, user_id: Snowflake, content: &str) -> Result<()>;

    async fn guild_roles(&self, guild_id: Snowflake) -> Result<Vec<Role>>;

    async fn add_member_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> Result<()>;

    /// Answers an interaction. Must happen within 3 seconds of it being created.
    async fn respond(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: InteractionResponse,
    ) -> Result<()>;
}

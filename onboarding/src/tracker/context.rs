use model::guild::Member;
use model::interaction::{MessageComponentInteraction, ModalSubmitInteraction};
use model::user::User;
use model::Snowflake;

/// The parts of an interaction the tracker needs to act on and answer it
#[derive(Debug, Clone)]
pub struct InteractionContext {
    pub id: Snowflake,
    pub token: String,
    pub guild_id: Option<Snowflake>,
    /// Thread the interaction happened in, which identifies the submission
    pub channel_id: Snowflake,
    pub user: User,
    pub member_roles: Vec<Snowflake>,
}

impl InteractionContext {
    /// `None` if Discord sent no user, which shouldn't happen for components
    pub fn from_component(interaction: &MessageComponentInteraction) -> Option<InteractionContext> {
        Self::build(
            interaction.id,
            &interaction.token,
            interaction.guild_id,
            interaction.channel_id,
            interaction.author(),
            interaction.member.as_ref(),
        )
    }

    pub fn from_modal(interaction: &ModalSubmitInteraction) -> Option<InteractionContext> {
        Self::build(
            interaction.id,
            &interaction.token,
            interaction.guild_id,
            interaction.channel_id,
            interaction.author(),
            interaction.member.as_ref(),
        )
    }

    fn build(
        id: Snowflake,
        token: &str,
        guild_id: Option<Snowflake>,
        channel_id: Snowflake,
        user: Option<&User>,
        member: Option<&Member>,
    ) -> Option<InteractionContext> {
        Some(InteractionContext {
            id,
            token: token.to_owned(),
            guild_id,
            channel_id,
            user: user?.clone(),
            member_roles: member.map(|m| m.roles.clone()).unwrap_or_default(),
        })
    }
}

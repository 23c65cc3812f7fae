use std::sync::Arc;

use async_trait::async_trait;
use gateway::payloads::event::GuildMemberAdd;
use gateway::{Event, EventHandler};
use model::interaction::{Interaction, MessageComponentInteraction, ModalSubmitInteraction};
use tracing::{debug, error};

use crate::messaging::MessagingGateway;
use crate::render;
use crate::tracker::{ApplicationTracker, IgnoreReason, InteractionContext, Outcome};
use crate::validation::FormInput;
use crate::Result;

/// Routes gateway dispatches to the tracker
pub struct Handler<G: MessagingGateway> {
    tracker: Arc<ApplicationTracker<G>>,
}

impl<G: MessagingGateway> Handler<G> {
    pub fn new(tracker: Arc<ApplicationTracker<G>>) -> Handler<G> {
        Handler { tracker }
    }

    pub async fn handle(&self, event: Event) -> Result<Outcome> {
        match event {
            Event::GuildMemberAdd(ev) => self.member_added(*ev).await,
            Event::InteractionCreate(interaction) => match *interaction {
                Interaction::MessageComponent(interaction) => self.component(*interaction).await,
                Interaction::ModalSubmit(interaction) => self.modal_submit(*interaction).await,
                _ => Ok(Outcome::Ignored(IgnoreReason::Unhandled)),
            },
            _ => Ok(Outcome::Ignored(IgnoreReason::Unhandled)),
        }
    }

    async fn member_added(&self, ev: GuildMemberAdd) -> Result<Outcome> {
        let user = match ev.member.user {
            Some(user) => user,
            None => return Ok(Outcome::Ignored(IgnoreReason::MissingAuthor)),
        };

        if user.bot {
            return Ok(Outcome::Ignored(IgnoreReason::BotUser));
        }

        self.tracker.start_application(ev.guild_id, &user).await
    }

    async fn component(&self, interaction: MessageComponentInteraction) -> Result<Outcome> {
        let ctx = match InteractionContext::from_component(&interaction) {
            Some(ctx) => ctx,
            None => return Ok(Outcome::Ignored(IgnoreReason::MissingAuthor)),
        };

        let custom_id = &*interaction.data.custom_id;
        if custom_id == render::ROLE_SELECT_ID {
            return self
                .tracker
                .record_role_selection(&ctx, interaction.data.values.as_slice())
                .await;
        }

        match render::decision_from_button(custom_id) {
            Some(decision) => self.tracker.decide_application(&ctx, decision).await,
            None => Ok(Outcome::Ignored(IgnoreReason::Unhandled)),
        }
    }

    async fn modal_submit(&self, interaction: ModalSubmitInteraction) -> Result<Outcome> {
        let custom_id = &*interaction.data.custom_id;
        if !custom_id.starts_with(render::APPLICATION_MODAL_ID) {
            return Ok(Outcome::Ignored(IgnoreReason::Unhandled));
        }

        let roles = match render::parse_modal_custom_id(custom_id) {
            Some(roles) => roles,
            None => return Ok(Outcome::Ignored(IgnoreReason::InvalidSelection)),
        };

        let ctx = match InteractionContext::from_modal(&interaction) {
            Some(ctx) => ctx,
            None => return Ok(Outcome::Ignored(IgnoreReason::MissingAuthor)),
        };

        let value = |id: &str| {
            interaction
                .data
                .value(id)
                .unwrap_or_default()
                .to_owned()
        };

        let input = FormInput {
            minecraft_nick: value(render::NICK_INPUT_ID),
            age: value(render::AGE_INPUT_ID),
            contact: value(render::CONTACT_INPUT_ID),
            other: value(render::OTHER_INPUT_ID),
        };

        self.tracker
            .submit_application_form(&ctx, roles, input)
            .await
    }
}

#[async_trait]
impl<G: MessagingGateway> EventHandler for Handler<G> {
    async fn handle_event(&self, event: Event) {
        let event_type = event.to_string();

        match self.handle(event).await {
            Ok(outcome) => {
                #[cfg(feature = "metrics")]
                crate::metrics::record(&outcome);

                debug!(%event_type, ?outcome, "Handled event");
            }
            Err(e) => {
                #[cfg(feature = "metrics")]
                crate::metrics::EVENT_ERRORS.inc();

                error!(%event_type, error = %e, "Error while handling event");
            }
        }
    }
}

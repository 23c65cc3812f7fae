use std::sync::Arc;

use model::channel::message::CreateMessage;
use model::guild::Role;
use model::interaction::InteractionResponse;
use model::user::User;
use model::Snowflake;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{
    Decision, FormData, IgnoreReason, InteractionContext, Outcome, RoleTag, Submission,
    SubmissionStore,
};
use crate::messaging::MessagingGateway;
use crate::validation::{self, FormInput};
use crate::{render, Config, Result};

/// Applicants younger than this are never granted platform roles
pub const ROLE_GRANT_MIN_AGE: u8 = 12;

const THREAD_NUMBER_RANGE: std::ops::Range<u32> = 0..99999;

/// Drives each applicant's submission from the thread being opened to a moderator's decision
pub struct ApplicationTracker<G: MessagingGateway> {
    config: Arc<Config>,
    gateway: Arc<G>,
    submissions: SubmissionStore,
}

impl<G: MessagingGateway> ApplicationTracker<G> {
    pub fn new(config: Arc<Config>, gateway: Arc<G>) -> ApplicationTracker<G> {
        ApplicationTracker {
            config,
            gateway,
            submissions: SubmissionStore::new(),
        }
    }

    pub fn submission(&self, thread_id: Snowflake) -> Option<Submission> {
        self.submissions.get(thread_id)
    }

    pub fn submissions(&self) -> &SubmissionStore {
        &self.submissions
    }

    /// Opens a private thread for a member who just joined and asks them to pick roles
    #[tracing::instrument(skip(self, applicant), fields(user_id = %applicant.id))]
    pub async fn start_application(&self, guild_id: Snowflake, applicant: &User) -> Result<Outcome> {
        let channel_id = self.config.applications_channel_id;
        let parent = match self.gateway.fetch_channel(channel_id).await? {
            Some(channel) => channel,
            None => {
                warn!(%channel_id, "Applications channel not found");
                return Ok(Outcome::Ignored(IgnoreReason::ChannelNotFound));
            }
        };

        let number = rand::rng().random_range(THREAD_NUMBER_RANGE);
        let name = render::thread_name(number);

        let thread = self.gateway.create_thread(parent.id, &name).await?;
        self.gateway.add_thread_member(thread.id, applicant.id).await?;

        self.submissions
            .insert(thread.id, Submission::new(applicant.id, guild_id, name));

        self.gateway
            .send_message(thread.id, render::role_select())
            .await?;

        let dm = render::direct_message(&thread.url());
        if let Err(e) = self.gateway.direct_message(applicant.id, &dm).await {
            debug!(error = %e, "Could not send direct message to applicant");
        }

        self.gateway
            .send_message(thread.id, CreateMessage::text(render::REMINDER))
            .await?;

        info!(thread_id = %thread.id, "Started application");
        Ok(Outcome::Started {
            thread_id: thread.id,
        })
    }

    /// Shows the form for the chosen roles. The selection is carried in the form's custom id,
    /// nothing is stored.
    #[tracing::instrument(skip(self, ctx, values), fields(thread_id = %ctx.channel_id))]
    pub async fn record_role_selection<S: AsRef<str> + Sync>(
        &self,
        ctx: &InteractionContext,
        values: &[S],
    ) -> Result<Outcome> {
        let roles = match RoleTag::parse_selection(values) {
            Some(roles) => roles,
            None => return Ok(Outcome::Ignored(IgnoreReason::InvalidSelection)),
        };

        match self.submissions.get(ctx.channel_id) {
            None => return Ok(Outcome::Ignored(IgnoreReason::UnknownThread)),
            Some(submission) if submission.status.has_form() => {
                self.reply(ctx, render::ALREADY_SUBMITTED).await?;
                return Ok(Outcome::Ignored(IgnoreReason::AlreadySubmitted));
            }
            Some(_) => {}
        }

        let modal = render::application_modal(&roles);
        self.respond(ctx, InteractionResponse::new_modal(modal))
            .await?;

        Ok(Outcome::FormPresented { roles })
    }

    /// Validates the form and hands a valid one over to the moderators
    #[tracing::instrument(skip(self, ctx, roles, input), fields(thread_id = %ctx.channel_id))]
    pub async fn submit_application_form(
        &self,
        ctx: &InteractionContext,
        roles: Vec<RoleTag>,
        input: FormInput,
    ) -> Result<Outcome> {
        let form = match validation::validate_form(input) {
            Ok(form) => form,
            Err(e) => {
                debug!(reason = ?e, "Form failed validation");
                self.reply(ctx, &e.to_string()).await?;
                return Ok(Outcome::Invalid(e));
            }
        };

        let collected = self
            .submissions
            .update(ctx.channel_id, |s| s.collect(form.clone(), roles.clone()));

        match collected {
            None => return Ok(Outcome::Ignored(IgnoreReason::UnknownThread)),
            Some(false) => {
                self.reply(ctx, render::ALREADY_SUBMITTED).await?;
                return Ok(Outcome::Ignored(IgnoreReason::AlreadySubmitted));
            }
            Some(true) => {}
        }

        // the interaction token has to be answered within 3 seconds
        self.reply(ctx, render::SUBMITTED).await?;

        self.gateway
            .send_message(ctx.channel_id, render::moderation_card(&form, &roles))
            .await?;

        self.log(render::submission_log(ctx.channel_id, &form, &roles))
            .await?;

        info!(nick = %form.minecraft_nick, "Application submitted");
        Ok(Outcome::Submitted)
    }

    /// Claim, accept or reject an application. Only moderators may decide.
    #[tracing::instrument(skip(self, ctx), fields(thread_id = %ctx.channel_id, moderator_id = %ctx.user.id))]
    pub async fn decide_application(
        &self,
        ctx: &InteractionContext,
        decision: Decision,
    ) -> Result<Outcome> {
        let submission = match self.submissions.get(ctx.channel_id) {
            Some(submission) => submission,
            None => return Ok(Outcome::Ignored(IgnoreReason::UnknownThread)),
        };

        let guild_id = ctx.guild_id.unwrap_or(submission.guild_id);
        let guild_roles = self.gateway.guild_roles(guild_id).await?;

        if !self.is_moderator(&ctx.member_roles, &guild_roles) {
            self.reply(ctx, render::MODERATOR_ONLY).await?;
            return Ok(Outcome::Denied);
        }

        let form = match &submission.form {
            Some(form) => form,
            None => return Ok(Outcome::Ignored(IgnoreReason::NotSubmitted)),
        };

        self.reply(ctx, render::ACKNOWLEDGED).await?;

        let moderator_id = ctx.user.id;
        let changed = self
            .submissions
            .update(ctx.channel_id, |s| s.apply(decision, moderator_id))
            .unwrap_or(false);

        let name = render::marked_thread_name(&submission.thread_name, decision);
        let renamed = self.gateway.rename_thread(ctx.channel_id, &name).await;
        match renamed {
            Ok(()) => {
                self.submissions
                    .update(ctx.channel_id, |s| s.thread_name = name);
            }
            Err(e) => debug!(error = %e, "Could not rename thread"),
        }

        let notice = render::decision_notice(decision, &ctx.user.username);
        self.gateway
            .send_message(ctx.channel_id, CreateMessage::text(notice))
            .await?;

        let granted_roles = match decision {
            Decision::Accept => self.grant_roles(&submission, form, &guild_roles).await,
            _ => Vec::new(),
        };

        self.log(render::decision_log(decision, moderator_id, ctx.channel_id))
            .await?;

        info!(?decision, changed, granted = granted_roles.len(), "Application decided");
        Ok(Outcome::Decided {
            decision,
            granted_roles,
        })
    }

    fn is_moderator(&self, member_roles: &[Snowflake], guild_roles: &[Role]) -> bool {
        guild_roles
            .iter()
            .filter(|role| member_roles.contains(&role.id))
            .any(|role| self.config.is_moderator_role(&role.name))
    }

    /// Grants the platform roles matching the selected tags, skipping roles that can't be found
    /// or granted
    async fn grant_roles(
        &self,
        submission: &Submission,
        form: &FormData,
        guild_roles: &[Role],
    ) -> Vec<Snowflake> {
        let mut granted = Vec::new();

        if form.age < ROLE_GRANT_MIN_AGE {
            debug!(age = form.age, "Applicant too young for platform roles");
            return granted;
        }

        for tag in &submission.selected_roles {
            let role_name = match self.config.platform_role_name(*tag) {
                Some(name) => name,
                None => continue,
            };

            let role = match guild_roles.iter().find(|role| role.name == role_name) {
                Some(role) => role,
                None => {
                    debug!(%role_name, "Role not found in guild");
                    continue;
                }
            };

            let res = self
                .gateway
                .add_member_role(submission.guild_id, submission.applicant_id, role.id)
                .await;

            match res {
                Ok(()) => granted.push(role.id),
                Err(e) => warn!(role_id = %role.id, error = %e, "Failed to grant role"),
            }
        }

        granted
    }

    async fn log(&self, content: String) -> Result<()> {
        let channel_id = self.config.log_channel_id;
        match self.gateway.fetch_channel(channel_id).await? {
            Some(channel) => {
                let message = CreateMessage::text(content).without_pings();
                self.gateway.send_message(channel.id, message).await
            }
            None => {
                warn!(%channel_id, "Log channel not found");
                Ok(())
            }
        }
    }

    async fn reply(&self, ctx: &InteractionContext, content: &str) -> Result<()> {
        self.respond(ctx, InteractionResponse::new_ephemeral_message(content))
            .await
    }

    async fn respond(&self, ctx: &InteractionContext, response: InteractionResponse) -> Result<()> {
        self.gateway.respond(ctx.id, &ctx.token, response).await
    }
}

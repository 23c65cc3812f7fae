use model::Snowflake;
use serde::Deserialize;

use crate::tracker::RoleTag;
use crate::Result;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub discord_token: String,

    /// Text channel new application threads are opened under
    pub applications_channel_id: Snowflake,
    pub log_channel_id: Snowflake,

    /// Names of the roles allowed to claim, accept and reject applications
    pub moderator_roles: Vec<String>,
    pub member_role_name: String,
    pub content_maker_role_name: String,

    #[serde(default)]
    pub sentry_dsn: Option<String>,
    #[serde(default)]
    pub json_log: bool,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub metrics_addr: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        envy::from_env().map_err(Into::into)
    }

    pub fn is_moderator_role(&self, role_name: &str) -> bool {
        self.moderator_roles
            .iter()
            .any(|name| name.trim() == role_name)
    }

    /// Guild role granted on acceptance for a selected tag. Only some tags map to a role.
    pub fn platform_role_name(&self, tag: RoleTag) -> Option<&str> {
        match tag {
            RoleTag::Member => Some(&self.member_role_name),
            RoleTag::Content => Some(&self.content_maker_role_name),
            _ => None,
        }
    }
}

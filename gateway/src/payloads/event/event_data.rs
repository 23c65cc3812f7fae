use serde::{Deserialize, Serialize};

use crate::ShardInfo;
use model::guild::Member;
use model::user::User;
use model::Snowflake;

#[derive(Serialize, Deserialize, Debug)]
pub struct Ready {
    #[serde(rename = "v")]
    pub gateway_version: i32,
    pub user: User,
    pub session_id: String,
    pub resume_gateway_url: String,
    #[serde(default)]
    pub shard: Option<ShardInfo>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GuildMemberAdd {
    pub guild_id: Snowflake,
    #[serde(flatten)]
    pub member: Member,
}

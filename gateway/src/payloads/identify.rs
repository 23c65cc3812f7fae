use super::Opcode;
use crate::ShardInfo;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct Identify {
    #[serde(rename = "op")]
    opcode: Opcode,

    #[serde(rename = "d")]
    pub data: IdentifyData,
}

impl Identify {
    pub fn new(token: String, shard_info: ShardInfo, intents: u64) -> Identify {
        Identify {
            opcode: Opcode::Identify,
            data: IdentifyData {
                token,
                properties: ConnectionProperties::new(),
                compress: None,
                shard_info,
                intents,
            },
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct IdentifyData {
    pub token: String,

    pub properties: ConnectionProperties,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,

    #[serde(rename = "shard")]
    pub shard_info: ShardInfo,

    pub intents: u64,
}

#[derive(Serialize, Debug, Clone)]
pub struct ConnectionProperties {
    pub os: String,
    pub browser: String,
    pub device: String,
}

const LIBRARY_NAME: &str = "onboarding";

impl ConnectionProperties {
    pub fn new() -> ConnectionProperties {
        ConnectionProperties {
            os: std::env::consts::OS.to_owned(),
            browser: LIBRARY_NAME.to_owned(),
            device: LIBRARY_NAME.to_owned(),
        }
    }
}

impl Default for ConnectionProperties {
    fn default() -> Self {
        Self::new()
    }
}

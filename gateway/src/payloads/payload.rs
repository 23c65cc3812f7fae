use super::Opcode;

use serde::Deserialize;
use serde_json::value::RawValue;

/// Envelope of every gateway message. `d` is kept raw so it can be decoded once the opcode
/// (and, for dispatches, the event name) is known.
#[derive(Deserialize, Debug)]
pub struct Payload {
    #[serde(rename = "op")]
    pub opcode: Opcode,

    #[serde(rename = "s")]
    pub seq: Option<u64>,

    #[serde(rename = "t")]
    pub event_type: Option<String>,

    #[serde(rename = "d")]
    pub data: Option<Box<RawValue>>,
}

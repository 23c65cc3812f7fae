use super::Opcode;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Heartbeat {
    #[serde(rename = "op")]
    opcode: Opcode,

    #[serde(rename = "d")]
    seq: Option<u64>,
}

impl Heartbeat {
    pub fn new(seq: Option<u64>) -> Heartbeat {
        Heartbeat {
            opcode: Opcode::Heartbeat,
            seq,
        }
    }
}

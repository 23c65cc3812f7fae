pub mod event;

mod payload;
pub use payload::Payload;

mod opcode;
pub use opcode::Opcode;

mod heartbeat;
pub use heartbeat::Heartbeat;

mod identify;
pub use identify::{ConnectionProperties, Identify, IdentifyData};

mod resume;
pub use resume::Resume;

mod hello;
pub use hello::HelloData;

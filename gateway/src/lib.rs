mod shard;
pub use shard::{Shard, ShardOptions};

pub mod payloads;
pub use payloads::event::Event;

mod handler;
pub use handler::EventHandler;

mod error;
pub use error::{GatewayError, Result};

mod intents;
pub use intents::Intents;

mod shard_info;
pub use shard_info::ShardInfo;

mod close_event;
pub use close_event::CloseEvent;

#[cfg(feature = "compression")]
mod inflater;

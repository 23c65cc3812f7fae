mod channel;
pub use channel::*;

mod channel_type;
pub use channel_type::ChannelType;

pub mod message;

mod thread_metadata;
pub use thread_metadata::{ThreadArchiveDuration, ThreadMetadata};

mod message;
pub use message::*;

mod allowed_mentions;
pub use allowed_mentions::AllowedMentions;

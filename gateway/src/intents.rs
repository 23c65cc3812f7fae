#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u64)]
pub enum Intents {
    Guilds = 1 << 0,
    GuildMembers = 1 << 1,
    GuildModeration = 1 << 2,
    GuildMessages = 1 << 9,
    GuildMessageReactions = 1 << 10,
    DirectMessages = 1 << 12,
    DirectMessageReactions = 1 << 13,
    MessageContent = 1 << 15,
}

impl Intents {
    pub fn build(intents: &[Intents]) -> u64 {
        intents.iter().fold(0, |acc, intent| acc | *intent as u64)
    }
}

use model::Snowflake;

use super::Decision;
use crate::validation::ValidationError;

/// Result of a tracker operation that completed without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A private thread was opened for a new member
    Started { thread_id: Snowflake },
    FormPresented { roles: Vec<super::RoleTag> },
    Submitted,
    /// The form was rejected and the applicant told why
    Invalid(ValidationError),
    Decided {
        decision: Decision,
        granted_roles: Vec<Snowflake>,
    },
    /// The user is not a moderator
    Denied,
    Ignored(IgnoreReason),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The configured applications channel could not be resolved
    ChannelNotFound,
    /// The interaction came from a thread that has no submission
    UnknownThread,
    InvalidSelection,
    AlreadySubmitted,
    /// A moderator acted on an application whose form hasn't been submitted
    NotSubmitted,
    MissingAuthor,
    BotUser,
    /// An interaction or event the bot doesn't handle
    Unhandled,
}


use std::fmt;
use std::str::FromStr;

use model::Snowflake;

/// Role an applicant can ask for in the selection menu
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RoleTag {
    Member,
    Content,
    Writer,
    Dev,
    Moderator,
    Tech,
    Other,
}

impl RoleTag {
    pub const ALL: [RoleTag; 7] = [
        RoleTag::Member,
        RoleTag::Content,
        RoleTag::Writer,
        RoleTag::Dev,
        RoleTag::Moderator,
        RoleTag::Tech,
        RoleTag::Other,
    ];

    /// How many tags one application may carry
    pub const MIN_SELECTED: usize = 1;
    pub const MAX_SELECTED: usize = 2;

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::Member => "member",
            RoleTag::Content => "content",
            RoleTag::Writer => "writer",
            RoleTag::Dev => "dev",
            RoleTag::Moderator => "moderator",
            RoleTag::Tech => "tech",
            RoleTag::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleTag::Member => "Участник",
            RoleTag::Content => "Контент мейкер",
            RoleTag::Writer => "Сценарист",
            RoleTag::Dev => "Разработчик плагинов",
            RoleTag::Moderator => "Модератор",
            RoleTag::Tech => "ТехАдмин",
            RoleTag::Other => "Другое",
        }
    }

    /// Parses the values of a selection, rejecting unknown tags and selections of the wrong
    /// size. Duplicates are collapsed.
    pub fn parse_selection<S: AsRef<str>>(values: &[S]) -> Option<Vec<RoleTag>> {
        let mut tags: Vec<RoleTag> = Vec::with_capacity(values.len());

        for value in values {
            let tag = value.as_ref().parse().ok()?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        if (Self::MIN_SELECTED..=Self::MAX_SELECTED).contains(&tags.len()) {
            Some(tags)
        } else {
            None
        }
    }
}

impl FromStr for RoleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown role tag \"{}\"", s))
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// Thread opened, waiting for the applicant to fill in the form
    Created,
    DataCollected,
    InProgress,
    Accepted,
    Rejected,
}

impl Status {
    pub fn has_form(&self) -> bool {
        !matches!(self, Status::Created)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Accepted | Status::Rejected)
    }
}

/// Validated answers from the application form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub minecraft_nick: String,
    pub age: u8,
    pub contact: Option<String>,
    pub other: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Claim,
    Accept,
    Reject,
}

impl Decision {
    /// Marker appended to the thread name once the decision is made
    pub fn marker(&self) -> &'static str {
        match self {
            Decision::Claim => "[В работе]",
            Decision::Accept => "[Принята]",
            Decision::Reject => "[Отклонена]",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub applicant_id: Snowflake,
    pub guild_id: Snowflake,
    pub thread_name: String,
    pub status: Status,
    pub selected_roles: Vec<RoleTag>,
    pub form: Option<FormData>,
    pub claimed_by: Option<Snowflake>,
}

impl Submission {
    pub fn new(applicant_id: Snowflake, guild_id: Snowflake, thread_name: String) -> Submission {
        Submission {
            applicant_id,
            guild_id,
            thread_name,
            status: Status::Created,
            selected_roles: Vec::new(),
            form: None,
            claimed_by: None,
        }
    }

    /// Stores the form. Form data is only ever written once.
    pub fn collect(&mut self, form: FormData, roles: Vec<RoleTag>) -> bool {
        if self.status != Status::Created {
            return false;
        }

        self.form = Some(form);
        self.selected_roles = roles;
        self.status = Status::DataCollected;
        true
    }

    /// Moves the status forward for a moderator's decision, returning whether it changed.
    /// Terminal statuses and submissions without a form are left alone.
    pub fn apply(&mut self, decision: Decision, moderator_id: Snowflake) -> bool {
        if !self.status.has_form() || self.status.is_terminal() {
            return false;
        }

        let next = match decision {
            Decision::Claim => {
                self.claimed_by = Some(moderator_id);
                Status::InProgress
            }
            Decision::Accept => Status::Accepted,
            Decision::Reject => Status::Rejected,
        };

        let changed = self.status != next;
        self.status = next;
        changed
    }
}

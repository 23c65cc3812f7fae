use lazy_static::lazy_static;
use regex::Regex;

use crate::tracker::FormData;

pub const MIN_AGE: u8 = 8;
pub const MAX_AGE: u8 = 99;

lazy_static! {
    static ref MINECRAFT_NICK: Regex = Regex::new(r"^[A-Za-z0-9_]{3,16}$").unwrap();
    static ref TELEGRAM_HANDLE: Regex = Regex::new(r"^@[A-Za-z0-9_]{3,}$").unwrap();
}

/// Why a form was refused. The message is shown to the applicant as-is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Возраст 8-99.")]
    Age,

    #[error("Неверный ник.")]
    MinecraftNick,

    #[error("Неверный Telegram.")]
    Telegram,
}

/// Raw text inputs of the application form
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub minecraft_nick: String,
    pub age: String,
    pub contact: String,
    pub other: String,
}

pub fn validate_age(age: &str) -> Option<u8> {
    age.trim()
        .parse::<u8>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}

pub fn validate_minecraft_nick(nick: &str) -> bool {
    MINECRAFT_NICK.is_match(nick)
}

/// An empty contact is valid, the field is optional
pub fn validate_telegram(handle: &str) -> bool {
    handle.is_empty() || TELEGRAM_HANDLE.is_match(handle)
}

/// Checks the fields in form order and reports the first failure. Nick and contact are matched
/// exactly as typed, only an empty contact counts as absent.
pub fn validate_form(input: FormInput) -> Result<FormData, ValidationError> {
    let age = validate_age(&input.age).ok_or(ValidationError::Age)?;

    if !validate_minecraft_nick(&input.minecraft_nick) {
        return Err(ValidationError::MinecraftNick);
    }

    if !validate_telegram(&input.contact) {
        return Err(ValidationError::Telegram);
    }

    let contact = Some(input.contact).filter(|contact| !contact.is_empty());
    let other = Some(input.other.trim().to_owned()).filter(|other| !other.is_empty());

    Ok(FormData {
        minecraft_nick: input.minecraft_nick,
        age,
        contact,
        other,
    })
}

//! Message, component and modal layouts shown to applicants and moderators

use model::channel::message::CreateMessage;
use model::interaction::{
    ActionRow, Button, ButtonStyle, Component, InputText, ModalResponseData, SelectMenu,
    SelectOption, TextStyleType,
};
use model::Snowflake;

use crate::tracker::{Decision, FormData, RoleTag};

pub const ROLE_SELECT_ID: &str = "role_select";
pub const APPLICATION_MODAL_ID: &str = "application_modal";
pub const CLAIM_BUTTON_ID: &str = "take_work";
pub const ACCEPT_BUTTON_ID: &str = "accept_app";
pub const REJECT_BUTTON_ID: &str = "reject_app";

pub const NICK_INPUT_ID: &str = "mc";
pub const AGE_INPUT_ID: &str = "age";
pub const CONTACT_INPUT_ID: &str = "contact";
pub const OTHER_INPUT_ID: &str = "other";

pub const SELECT_PROMPT: &str = "Пройдите заявку:";
pub const REMINDER: &str = "Пожалуйста, пройдите заявку.";
pub const SUBMITTED: &str = "Отправлено!";
pub const ALREADY_SUBMITTED: &str = "Заявка уже отправлена.";
pub const MODERATOR_ONLY: &str = "Только модератор";
pub const ACKNOWLEDGED: &str = "ОК";

// Discord rejects longer channel names
const MAX_CHANNEL_NAME_LENGTH: usize = 100;

pub fn thread_name(number: u32) -> String {
    format!("Заявка-{}", number)
}

/// Thread name with a status marker appended
pub fn marked_thread_name(name: &str, decision: Decision) -> String {
    let marked = format!("{} {}", name, decision.marker());
    marked.chars().take(MAX_CHANNEL_NAME_LENGTH).collect()
}

pub fn direct_message(thread_url: &str) -> String {
    format!("Ваша заявка: {}", thread_url)
}

pub fn role_select() -> CreateMessage {
    let options = RoleTag::ALL
        .iter()
        .map(|tag| SelectOption::new(tag.label(), tag.as_str()))
        .collect();

    let menu = SelectMenu::new(ROLE_SELECT_ID, options)
        .placeholder("Кем вы хотите стать?")
        .values(RoleTag::MIN_SELECTED as u8, RoleTag::MAX_SELECTED as u8);

    CreateMessage::text(SELECT_PROMPT).with_components(vec![ActionRow::single(menu)])
}

/// The selection travels in the modal's custom id, so the submit handler needs no other state
pub fn modal_custom_id(roles: &[RoleTag]) -> String {
    format!("{}:{}", APPLICATION_MODAL_ID, join_tags(roles, ","))
}

/// Recovers the selection from a modal custom id. `None` if the id isn't one of ours.
pub fn parse_modal_custom_id(custom_id: &str) -> Option<Vec<RoleTag>> {
    let (prefix, tags) = custom_id.split_once(':')?;
    if prefix != APPLICATION_MODAL_ID {
        return None;
    }

    let tags: Vec<&str> = tags.split(',').collect();
    RoleTag::parse_selection(&tags)
}

pub fn application_modal(roles: &[RoleTag]) -> ModalResponseData {
    let inputs = [
        InputText::new(NICK_INPUT_ID, "Ник в Minecraft", TextStyleType::Short),
        InputText::new(AGE_INPUT_ID, "Возраст", TextStyleType::Short),
        InputText::new(
            CONTACT_INPUT_ID,
            "Контакт (Telegram, опционально)",
            TextStyleType::Short,
        )
        .required(false),
        InputText::new(OTHER_INPUT_ID, "Если выбрали 'Другое'", TextStyleType::Paragraph)
            .required(false),
    ];

    ModalResponseData {
        custom_id: modal_custom_id(roles).into_boxed_str(),
        title: Box::from("Заявка"),
        components: inputs.into_iter().map(ActionRow::single).collect(),
    }
}

/// Summary of a submitted form posted in the thread, with the moderator actions attached
pub fn moderation_card(form: &FormData, roles: &[RoleTag]) -> CreateMessage {
    let content = format!(
        "***Новая заявка***\nНик: **{}**\nВозраст: **{}**\nКонтакт: **{}**\nВыбор: **{}**\nДругое: **{}**",
        form.minecraft_nick,
        form.age,
        form.contact.as_deref().unwrap_or("-"),
        join_tags(roles, ", "),
        form.other.as_deref().unwrap_or("-"),
    );

    let buttons = vec![
        Button::new(CLAIM_BUTTON_ID, "Взять", ButtonStyle::Primary).into(),
        Button::new(ACCEPT_BUTTON_ID, "Принять", ButtonStyle::Success).into(),
        Button::new(REJECT_BUTTON_ID, "Отклонить", ButtonStyle::Danger).into(),
    ];

    CreateMessage::text(content)
        .with_components(vec![Component::ActionRow(ActionRow::new(buttons))])
        .without_pings()
}

pub fn decision_from_button(custom_id: &str) -> Option<Decision> {
    match custom_id {
        CLAIM_BUTTON_ID => Some(Decision::Claim),
        ACCEPT_BUTTON_ID => Some(Decision::Accept),
        REJECT_BUTTON_ID => Some(Decision::Reject),
        _ => None,
    }
}

/// Notice posted in the applicant's thread
pub fn decision_notice(decision: Decision, moderator_name: &str) -> String {
    match decision {
        Decision::Claim => format!("🟦 Модератор {} взял в работу.", moderator_name),
        Decision::Accept => format!("🟩 Одобрено модератором {}.", moderator_name),
        Decision::Reject => format!("🟥 Отклонено модератором {}.", moderator_name),
    }
}

/// Line posted in the moderation log channel
pub fn decision_log(decision: Decision, moderator_id: Snowflake, thread_id: Snowflake) -> String {
    match decision {
        Decision::Claim => format!(
            "🟦 {} взял в работу {}",
            moderator_id.user_mention(),
            thread_id.channel_mention()
        ),
        Decision::Accept => format!("🟩 {} принято", thread_id.channel_mention()),
        Decision::Reject => format!("🟥 {} отклонена", thread_id.channel_mention()),
    }
}

pub fn submission_log(thread_id: Snowflake, form: &FormData, roles: &[RoleTag]) -> String {
    format!(
        "📥 Создана заявка в {}\nНик: {}\nВозраст: {}\nРоли: {}",
        thread_id.channel_mention(),
        form.minecraft_nick,
        form.age,
        join_tags(roles, ", ")
    )
}

fn join_tags(roles: &[RoleTag], separator: &str) -> String {
    roles
        .iter()
        .map(RoleTag::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

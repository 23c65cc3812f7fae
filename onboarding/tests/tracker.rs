mod common;

use std::sync::atomic::Ordering;

use common::*;
use model::interaction::InteractionResponseType;
use model::Snowflake;
use onboarding::tracker::{Decision, IgnoreReason, RoleTag, Status};
use onboarding::validation::ValidationError;
use onboarding::Outcome;

async fn started(h: &Harness) -> Snowflake {
    match h.tracker.start_application(GUILD_ID, &applicant()).await.unwrap() {
        Outcome::Started { thread_id } => thread_id,
        other => panic!("expected application to start, got {:?}", other),
    }
}

/// Starts an application and submits a valid form with the given roles and age
async fn submitted(h: &Harness, roles: Vec<RoleTag>, age: &str) -> Snowflake {
    let thread_id = started(h).await;

    let outcome = h
        .tracker
        .submit_application_form(&applicant_ctx(thread_id), roles, form("Steve_1", age, ""))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Submitted);

    h.gateway.clear();
    thread_id
}

#[tokio::test]
async fn test_start_application() {
    let h = harness();
    let thread_id = started(&h).await;

    let calls = h.gateway.calls();
    match &calls[0] {
        Call::CreateThread { parent_id, name } => {
            assert_eq!(*parent_id, APPLICATIONS_CHANNEL);
            assert!(name.starts_with("Заявка-"), "unexpected name {}", name);
        }
        other => panic!("expected thread to be created first, got {:?}", other),
    }
    assert_eq!(
        calls[1],
        Call::AddThreadMember {
            thread_id,
            user_id: APPLICANT_ID
        }
    );

    assert_eq!(
        h.gateway.messages_in(thread_id),
        vec!["Пройдите заявку:", "Пожалуйста, пройдите заявку."]
    );
    assert!(calls.contains(&Call::SendMessage {
        channel_id: thread_id,
        content: "Пройдите заявку:".to_owned(),
        components: 1,
    }));
    assert!(calls.contains(&Call::DirectMessage {
        user_id: APPLICANT_ID,
        content: format!("Ваша заявка: https://discord.com/channels/1/{}", thread_id),
    }));

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::Created);
    assert_eq!(submission.applicant_id, APPLICANT_ID);
    assert!(submission.selected_roles.is_empty());
    assert!(submission.form.is_none());
}

#[tokio::test]
async fn test_missing_applications_channel() {
    let h = harness();
    h.gateway.remove_channel(APPLICATIONS_CHANNEL);

    let outcome = h.tracker.start_application(GUILD_ID, &applicant()).await.unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::ChannelNotFound));
    assert!(h.gateway.calls().is_empty());
    assert!(h.tracker.submissions().is_empty());
}

#[tokio::test]
async fn test_direct_message_failure_is_swallowed() {
    let h = harness();
    h.gateway.fail_direct_messages.store(true, Ordering::SeqCst);

    let thread_id = started(&h).await;

    assert_eq!(h.gateway.messages_in(thread_id).len(), 2);
    assert!(h.tracker.submission(thread_id).is_some());
}

#[tokio::test]
async fn test_role_selection_presents_form() {
    let h = harness();
    let thread_id = started(&h).await;
    h.gateway.clear();

    let outcome = h
        .tracker
        .record_role_selection(&applicant_ctx(thread_id), &["member", "content"])
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::FormPresented {
            roles: vec![RoleTag::Member, RoleTag::Content]
        }
    );

    match &h.gateway.responses()[0] {
        Call::Respond {
            response_type,
            modal_id,
            ..
        } => {
            assert_eq!(*response_type, InteractionResponseType::Modal);
            assert_eq!(modal_id.as_deref(), Some("application_modal:member,content"));
        }
        other => panic!("expected a modal, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reselection_never_duplicates_submission() {
    let h = harness();
    let thread_id = started(&h).await;

    for values in [["member", "dev"], ["tech", "other"]] {
        h.tracker
            .record_role_selection(&applicant_ctx(thread_id), &values)
            .await
            .unwrap();
    }

    assert_eq!(h.tracker.submissions().len(), 1);
    assert_eq!(h.gateway.responses().len(), 2);
    assert_eq!(h.tracker.submission(thread_id).unwrap().status, Status::Created);
}

#[tokio::test]
async fn test_invalid_selection_is_ignored() {
    let h = harness();
    let thread_id = started(&h).await;
    h.gateway.clear();

    let ctx = applicant_ctx(thread_id);
    for values in [vec!["member", "content", "dev"], vec!["admin"], vec![]] {
        let outcome = h.tracker.record_role_selection(&ctx, &values).await.unwrap();
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::InvalidSelection));
    }

    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_selection_after_submission() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "20").await;

    let outcome = h
        .tracker
        .record_role_selection(&applicant_ctx(thread_id), &["dev"])
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::AlreadySubmitted));
    assert_eq!(h.gateway.last_reply().as_deref(), Some("Заявка уже отправлена."));
}

#[tokio::test]
async fn test_invalid_form_reports_first_failure() {
    let h = harness();
    let thread_id = started(&h).await;
    h.gateway.clear();

    let cases = [
        (form("Steve_1", "7", ""), ValidationError::Age, "Возраст 8-99."),
        (form("Steve_1", "12.5", ""), ValidationError::Age, "Возраст 8-99."),
        (form("bad nick", "abc", "joe"), ValidationError::Age, "Возраст 8-99."),
        (form("ab", "20", "joe"), ValidationError::MinecraftNick, "Неверный ник."),
        (form("Steve_1", "20", "@jo"), ValidationError::Telegram, "Неверный Telegram."),
    ];

    for (input, error, message) in cases {
        let outcome = h
            .tracker
            .submit_application_form(&applicant_ctx(thread_id), vec![RoleTag::Member], input)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Invalid(error));
        assert_eq!(h.gateway.last_reply().as_deref(), Some(message));
    }

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::Created);
    assert!(submission.form.is_none());
    assert!(h.gateway.messages_in(thread_id).is_empty());
}

#[tokio::test]
async fn test_submit_form() {
    let h = harness();
    let thread_id = started(&h).await;
    h.gateway.clear();

    let mut input = form("Steve_1", "20", "");
    input.other = "Строю редстоун".to_owned();

    let outcome = h
        .tracker
        .submit_application_form(&applicant_ctx(thread_id), vec![RoleTag::Other], input)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Submitted);

    let card = &h.gateway.messages_in(thread_id)[0];
    assert_eq!(
        card,
        "***Новая заявка***\nНик: **Steve_1**\nВозраст: **20**\nКонтакт: **-**\nВыбор: **other**\nДругое: **Строю редстоун**"
    );
    assert!(h.gateway.calls().contains(&Call::SendMessage {
        channel_id: thread_id,
        content: card.clone(),
        components: 1,
    }));

    assert_eq!(
        h.gateway.messages_in(LOG_CHANNEL),
        vec![format!(
            "📥 Создана заявка в <#{}>\nНик: Steve_1\nВозраст: 20\nРоли: other",
            thread_id
        )]
    );
    assert_eq!(h.gateway.last_reply().as_deref(), Some("Отправлено!"));

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::DataCollected);
    assert_eq!(submission.selected_roles, vec![RoleTag::Other]);
    assert_eq!(submission.form.unwrap().age, 20);
}

#[tokio::test]
async fn test_form_is_only_accepted_once() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "20").await;

    let outcome = h
        .tracker
        .submit_application_form(&applicant_ctx(thread_id), vec![RoleTag::Dev], form("Alex_2", "30", ""))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::AlreadySubmitted));

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::DataCollected);
    assert_eq!(submission.form.unwrap().minecraft_nick, "Steve_1");
    assert_eq!(submission.selected_roles, vec![RoleTag::Member]);
    assert!(h.gateway.messages_in(thread_id).is_empty());
}

#[tokio::test]
async fn test_submit_in_unknown_thread() {
    let h = harness();

    let outcome = h
        .tracker
        .submit_application_form(&applicant_ctx(Snowflake(42)), vec![RoleTag::Member], form("Steve_1", "20", ""))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::UnknownThread));
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_non_moderator_is_denied() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "20").await;

    for roles in [vec![], vec![MEMBER_ROLE, UNRELATED_ROLE]] {
        let context = ctx(thread_id, applicant(), roles);
        let outcome = h.tracker.decide_application(&context, Decision::Accept).await.unwrap();

        assert_eq!(outcome, Outcome::Denied);
        assert_eq!(h.gateway.last_reply().as_deref(), Some("Только модератор"));
    }

    assert_eq!(h.tracker.submission(thread_id).unwrap().status, Status::DataCollected);
    assert!(h.gateway.granted_roles().is_empty());
    assert!(h.gateway.messages_in(thread_id).is_empty());
}

#[tokio::test]
async fn test_decision_in_unknown_thread_is_silent() {
    let h = harness();

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(Snowflake(42)), Decision::Reject)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::UnknownThread));
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_decision_before_form() {
    let h = harness();
    let thread_id = started(&h).await;
    h.gateway.clear();

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::NotSubmitted));
    assert!(h.gateway.calls().is_empty());
    assert_eq!(h.tracker.submission(thread_id).unwrap().status, Status::Created);
}

#[tokio::test]
async fn test_claim() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "20").await;
    let name = h.tracker.submission(thread_id).unwrap().thread_name;

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Claim)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Decided {
            decision: Decision::Claim,
            granted_roles: vec![]
        }
    );
    assert!(h.gateway.calls().contains(&Call::RenameThread {
        thread_id,
        name: format!("{} [В работе]", name),
    }));
    assert_eq!(
        h.gateway.messages_in(thread_id),
        vec!["🟦 Модератор mod_bob взял в работу."]
    );
    assert_eq!(
        h.gateway.messages_in(LOG_CHANNEL),
        vec![format!("🟦 <@{}> взял в работу <#{}>", MODERATOR_ID, thread_id)]
    );
    assert_eq!(h.gateway.last_reply().as_deref(), Some("ОК"));
    assert!(h.gateway.granted_roles().is_empty());

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::InProgress);
    assert_eq!(submission.claimed_by, Some(MODERATOR_ID));
    assert_eq!(submission.thread_name, format!("{} [В работе]", name));
}

#[tokio::test]
async fn test_markers_accumulate_on_thread_name() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Dev], "20").await;
    let name = h.tracker.submission(thread_id).unwrap().thread_name;

    for decision in [Decision::Claim, Decision::Accept] {
        h.tracker
            .decide_application(&moderator_ctx(thread_id), decision)
            .await
            .unwrap();
    }

    assert_eq!(
        h.tracker.submission(thread_id).unwrap().thread_name,
        format!("{} [В работе] [Принята]", name)
    );
    assert_eq!(h.tracker.submission(thread_id).unwrap().status, Status::Accepted);
}

#[tokio::test]
async fn test_rename_failure_is_swallowed() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "20").await;
    let name = h.tracker.submission(thread_id).unwrap().thread_name;
    h.gateway.fail_renames.store(true, Ordering::SeqCst);

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Reject)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Decided { decision: Decision::Reject, .. }));
    assert_eq!(
        h.gateway.messages_in(thread_id),
        vec!["🟥 Отклонено модератором mod_bob."]
    );
    assert_eq!(
        h.gateway.messages_in(LOG_CHANNEL),
        vec![format!("🟥 <#{}> отклонена", thread_id)]
    );

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::Rejected);
    assert_eq!(submission.thread_name, name);
}

#[tokio::test]
async fn test_missing_log_channel() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "20").await;
    h.gateway.remove_channel(LOG_CHANNEL);

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Decided { decision: Decision::Accept, .. }));
    assert!(h.gateway.messages_in(LOG_CHANNEL).is_empty());
    assert_eq!(h.gateway.last_reply().as_deref(), Some("ОК"));
}

#[tokio::test]
async fn test_no_roles_granted_at_eleven() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "11").await;

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Decided {
            decision: Decision::Accept,
            granted_roles: vec![]
        }
    );
    assert!(h.gateway.granted_roles().is_empty());
    assert_eq!(h.tracker.submission(thread_id).unwrap().status, Status::Accepted);
}

#[tokio::test]
async fn test_member_role_granted_at_twelve() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member], "12").await;

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Decided {
            decision: Decision::Accept,
            granted_roles: vec![MEMBER_ROLE]
        }
    );
    assert_eq!(
        h.gateway.calls().into_iter().filter(|c| matches!(c, Call::AddMemberRole { .. })).collect::<Vec<_>>(),
        vec![Call::AddMemberRole {
            guild_id: GUILD_ID,
            user_id: APPLICANT_ID,
            role_id: MEMBER_ROLE,
        }]
    );
    assert_eq!(
        h.gateway.messages_in(thread_id),
        vec!["🟩 Одобрено модератором mod_bob."]
    );
    assert_eq!(
        h.gateway.messages_in(LOG_CHANNEL),
        vec![format!("🟩 <#{}> принято", thread_id)]
    );
}

#[tokio::test]
async fn test_unmapped_tags_grant_nothing() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Writer, RoleTag::Tech], "30").await;

    h.tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert!(h.gateway.granted_roles().is_empty());
}

#[tokio::test]
async fn test_missing_platform_role_is_skipped() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member, RoleTag::Content], "15").await;
    h.gateway.remove_role(CONTENT_ROLE);

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Decided {
            decision: Decision::Accept,
            granted_roles: vec![MEMBER_ROLE]
        }
    );
    assert_eq!(h.gateway.granted_roles(), vec![MEMBER_ROLE]);
    assert_eq!(h.gateway.last_reply().as_deref(), Some("ОК"));
}

#[tokio::test]
async fn test_failed_grant_is_skipped() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member, RoleTag::Content], "15").await;
    h.gateway.fail_role_grants.store(true, Ordering::SeqCst);

    let outcome = h
        .tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Decided {
            decision: Decision::Accept,
            granted_roles: vec![]
        }
    );
    assert_eq!(h.tracker.submission(thread_id).unwrap().status, Status::Accepted);
    assert_eq!(
        h.gateway.messages_in(LOG_CHANNEL),
        vec![format!("🟩 <#{}> принято", thread_id)]
    );
    assert_eq!(h.gateway.last_reply().as_deref(), Some("ОК"));
}

#[tokio::test]
async fn test_decision_is_acknowledged_first() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member, RoleTag::Content], "15").await;

    h.tracker
        .decide_application(&moderator_ctx(thread_id), Decision::Accept)
        .await
        .unwrap();

    let respond = h
        .gateway
        .position(|c| matches!(c, Call::Respond { .. }))
        .unwrap();
    let rename = h
        .gateway
        .position(|c| matches!(c, Call::RenameThread { .. }))
        .unwrap();
    let grant = h
        .gateway
        .position(|c| matches!(c, Call::AddMemberRole { .. }))
        .unwrap();

    assert_eq!(respond, 0);
    assert!(respond < rename);
    assert!(respond < grant);
}

#[tokio::test]
async fn test_submission_is_acknowledged_first() {
    let h = harness();
    let thread_id = started(&h).await;
    h.gateway.clear();

    h.tracker
        .submit_application_form(
            &applicant_ctx(thread_id),
            vec![RoleTag::Member],
            form("Steve_1", "20", ""),
        )
        .await
        .unwrap();

    let respond = h
        .gateway
        .position(|c| matches!(c, Call::Respond { .. }))
        .unwrap();
    let card = h
        .gateway
        .position(|c| matches!(c, Call::SendMessage { .. }))
        .unwrap();

    assert_eq!(respond, 0);
    assert!(respond < card);
}

#[tokio::test]
async fn test_status_never_leaves_terminal() {
    let h = harness();
    let thread_id = submitted(&h, vec![RoleTag::Member, RoleTag::Content], "20").await;

    for _ in 0..2 {
        h.tracker
            .decide_application(&moderator_ctx(thread_id), Decision::Accept)
            .await
            .unwrap();
    }

    // repeated accepts re-grant the same two roles and nothing else
    let mut granted = h.gateway.granted_roles();
    granted.sort();
    granted.dedup();
    assert_eq!(granted, vec![MEMBER_ROLE, CONTENT_ROLE]);

    for decision in [Decision::Reject, Decision::Claim] {
        h.tracker
            .decide_application(&moderator_ctx(thread_id), decision)
            .await
            .unwrap();
    }

    let submission = h.tracker.submission(thread_id).unwrap();
    assert_eq!(submission.status, Status::Accepted);
    assert_eq!(submission.claimed_by, None);
}

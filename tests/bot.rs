mod helpers;

use helpers::setup::{
    callback_update, command_update, insert_due_occurrence, message, setup_context,
    RecordingResponder, ScriptedSource,
};
use nagging_bot_api::{
    configure_dispatcher, encode_occurrence_callback, Application, FanOutNotifier,
    LoggingNotifier, Notifier, OccurrenceAction, Scheduler, TelegramNotifier,
};
use nagging_bot_domain::OccurrenceStatus;
use nagging_bot_infra::{
    telegram::{Responder, UpdateSource},
    NagContext,
};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

async fn status_of(ctx: &NagContext, id: i64) -> OccurrenceStatus {
    ctx.repos.occurrences.get(id).await.unwrap().unwrap().status
}

fn telegram_notifier(ctx: &NagContext, responder: &Arc<RecordingResponder>) -> Arc<dyn Notifier> {
    Arc::new(TelegramNotifier::new(
        ctx.repos.users.clone(),
        responder.clone(),
    ))
}

#[tokio::test]
async fn due_occurrence_is_delivered_with_buttons() {
    let ctx = setup_context();
    let (reminder, occurrence) = insert_due_occurrence(&ctx, 99).await;
    let responder = Arc::new(RecordingResponder::default());
    let sinks = vec![
        Arc::new(LoggingNotifier) as Arc<dyn Notifier>,
        telegram_notifier(&ctx, &responder),
    ];
    let scheduler = Scheduler::new(ctx.clone(), Arc::new(FanOutNotifier::new(sinks)));

    let summary = scheduler.tick().await.unwrap();
    assert_eq!((summary.due, summary.sent, summary.failed), (1, 1, 0));
    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Sent);

    let sent = responder.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 99);
    assert_eq!(
        sent[0].text,
        format!(
            "Reminder: Pill\nVitC\nOccurrence #{} at 2026-01-19T07:59:00Z",
            occurrence.id
        )
    );
    let buttons = &sent[0].markup.as_ref().unwrap().inline_keyboard[0];
    assert_eq!(
        buttons[0].callback_data,
        encode_occurrence_callback(occurrence.id, OccurrenceAction::Done)
    );
    assert_eq!(reminder.id, 1);

    // Nothing is due anymore
    let summary = scheduler.tick().await.unwrap();
    assert_eq!(summary.due, 0);
    assert_eq!(responder.sent().len(), 1);
}

#[tokio::test]
async fn failed_delivery_is_retried_on_next_tick() {
    let ctx = setup_context();
    let (_, occurrence) = insert_due_occurrence(&ctx, 99).await;

    let broken = Arc::new(RecordingResponder::failing());
    let scheduler = Scheduler::new(ctx.clone(), telegram_notifier(&ctx, &broken));
    let summary = scheduler.tick().await.unwrap();
    assert_eq!((summary.sent, summary.failed), (0, 1));
    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Created);

    let working = Arc::new(RecordingResponder::default());
    let scheduler = Scheduler::new(ctx.clone(), telegram_notifier(&ctx, &working));
    let summary = scheduler.tick().await.unwrap();
    assert_eq!(summary.sent, 1);
    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Sent);
}

#[tokio::test]
async fn fan_out_succeeds_when_one_sink_fails() {
    let ctx = setup_context();
    let (_, occurrence) = insert_due_occurrence(&ctx, 99).await;
    let broken = Arc::new(RecordingResponder::failing());
    let working = Arc::new(RecordingResponder::default());
    let sinks = vec![
        telegram_notifier(&ctx, &broken),
        telegram_notifier(&ctx, &working),
    ];
    let scheduler = Scheduler::new(ctx.clone(), Arc::new(FanOutNotifier::new(sinks)));

    let summary = scheduler.tick().await.unwrap();
    assert_eq!(summary.sent, 1);
    assert_eq!(working.sent().len(), 1);
    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Sent);
}

#[tokio::test]
async fn done_button_acknowledges_occurrence() {
    let ctx = setup_context();
    let (_, occurrence) = insert_due_occurrence(&ctx, 99).await;
    ctx.repos
        .occurrences
        .update_status(occurrence.id, OccurrenceStatus::Sent)
        .await
        .unwrap();
    let responder = Arc::new(RecordingResponder::default());
    let as_responder: Arc<dyn Responder> = responder.clone();
    let dispatcher = configure_dispatcher(&ctx, &as_responder);

    let delivered = message(500, 99, "Reminder: Pill");
    let data = encode_occurrence_callback(occurrence.id, OccurrenceAction::Done);
    dispatcher
        .dispatch(&callback_update(1, 99, &data, delivered))
        .await;

    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Done);
    let edited = responder.edited();
    assert_eq!(edited.len(), 1);
    assert_eq!(edited[0].message_id, 500);
    assert_eq!(edited[0].text, "Reminder: Pill\n\nStatus: ✅ Done");

    // A late tap on Ignore does not undo the acknowledgement
    let data = encode_occurrence_callback(occurrence.id, OccurrenceAction::Ignore);
    dispatcher
        .dispatch(&callback_update(2, 99, &data, message(500, 99, "Reminder: Pill")))
        .await;
    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Done);
}

#[tokio::test]
async fn malformed_callback_changes_nothing() {
    let ctx = setup_context();
    let (_, occurrence) = insert_due_occurrence(&ctx, 99).await;
    let responder = Arc::new(RecordingResponder::default());
    let as_responder: Arc<dyn Responder> = responder.clone();
    let dispatcher = configure_dispatcher(&ctx, &as_responder);

    for data in ["occ:x:done", "occ:1:later", "noop", ""] {
        dispatcher
            .dispatch(&callback_update(1, 99, data, message(500, 99, "Reminder")))
            .await;
    }
    assert_eq!(status_of(&ctx, occurrence.id).await, OccurrenceStatus::Created);
    assert!(responder.edited().is_empty());
    // Only the undecodable tokens get an answer
    let replies = responder.sent();
    assert_eq!(replies.len(), 2);
    assert!(replies
        .iter()
        .all(|m| m.chat_id == 99 && m.text == "Unable to apply this action"));
}

#[tokio::test]
async fn commands_create_list_and_delete_reminders() {
    let ctx = setup_context();
    let responder = Arc::new(RecordingResponder::default());
    let as_responder: Arc<dyn Responder> = responder.clone();
    let dispatcher = configure_dispatcher(&ctx, &as_responder);

    let commands = [
        "/start",
        "/reminder Pill_VitC_19.01.2026_20.01.2026_08:00;19:00_Europe/Warsaw",
        "/list@nagging_bot",
        "/delete 1",
        "/list",
        "/unknown",
    ];
    for (i, text) in commands.iter().enumerate() {
        dispatcher
            .dispatch(&command_update(i as i64 + 1, 7, text))
            .await;
    }

    let replies = responder
        .sent()
        .into_iter()
        .map(|m| {
            assert_eq!(m.chat_id, 7);
            m.text
        })
        .collect::<Vec<_>>();
    assert_eq!(replies.len(), 5);
    assert!(replies[0].starts_with("Hi, Ada!"));
    assert_eq!(replies[1], "Reminder created: Pill (VitC) in Europe/Warsaw");
    assert_eq!(
        replies[2],
        "Your reminders (latest up to 20):\n#1: Pill | VitC | 19.01.2026 to 20.01.2026 | TZ=Europe/Warsaw | Times=08:00;19:00"
    );
    assert_eq!(replies[3], "Reminder deleted");
    assert_eq!(replies[4], "No reminders found.");
}

#[tokio::test]
async fn application_answers_updates_until_cancelled() {
    let ctx = setup_context();
    let mut ctx_fast = ctx.clone();
    ctx_fast.config.poll_interval = Duration::from_millis(10);
    let responder = Arc::new(RecordingResponder::default());
    let source: Arc<dyn UpdateSource> = Arc::new(ScriptedSource::new(vec![vec![
        command_update(1, 7, "/start"),
        command_update(2, 7, "/list"),
    ]]));
    let app = Application::with_transport(ctx_fast, responder.clone(), source);

    let cancel = CancellationToken::new();
    let running = tokio::spawn(app.start(cancel.clone()));
    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();

    running.await.unwrap().unwrap();
    let replies = responder.sent();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[1].text, "No reminders found.");
    assert!(ctx.repos.users.get_by_external_id(7).await.unwrap().is_some());
}

use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use lexi_types::{AppEvent, DictionaryId, LookupErrorKind, SearchPhase, SessionSnapshot};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::events::event_loop;

/// Wait for the first snapshot satisfying `done`
async fn wait_for(
    rx: &AsyncReceiver<SessionSnapshot>,
    done: impl Fn(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    let result = timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = rx.recv().await.expect("snapshot channel open");
            if done(&snapshot) {
                return snapshot;
            }
        }
    })
    .await;

    match result {
        Ok(snapshot) => snapshot,
        Err(_) => panic!("Timeout - expected snapshot never arrived"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_events_flow_through_to_revealed_result() {
    let (ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (app_tx, app_rx) = kanal::unbounded_async::<SessionSnapshot>();

    let dictionary = Arc::new(FakeDictionary::new().respond(
        "hello",
        Duration::from_millis(30),
        Ok(entry("hello", Some("/həˈloʊ/"), "used as a greeting.")),
    ));
    let suggestions = Arc::new(FakeSuggestions::with_words(&["help", "hello"]));
    let search = controller(dictionary, suggestions);

    let handle = tokio::spawn(event_loop(search, ui_rx, app_tx, CancellationToken::new()));

    let initial = wait_for(&app_rx, |_| true).await;
    assert_eq!(initial.phase, SearchPhase::Idle);
    assert!(initial.suggestions_enabled);

    ui_tx.send(AppEvent::QueryChanged("hel".into())).await.unwrap();
    let suggested = wait_for(&app_rx, |s| !s.suggestions.is_empty()).await;
    assert_eq!(suggested.suggestions, vec!["help", "hello"]);
    assert_eq!(suggested.phase, SearchPhase::Idle);

    ui_tx.send(AppEvent::SelectSuggestion("hello".into())).await.unwrap();
    let loading = wait_for(&app_rx, |s| s.phase == SearchPhase::Loading).await;
    assert_eq!(loading.query, "hello");
    assert!(loading.suggestions.is_empty());

    let header = wait_for(&app_rx, |s| s.phase == SearchPhase::Success).await;
    assert!(!header.details_visible);
    assert_eq!(header.result.as_ref().unwrap().word, "hello");

    let revealed = wait_for(&app_rx, |s| s.details_visible).await;
    assert_eq!(
        revealed.result.as_ref().unwrap().primary_definition(),
        Some("used as a greeting.")
    );

    ui_tx.send(AppEvent::Close).await.unwrap();
    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "event loop should exit cleanly");
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_event_loop() {
    let (_ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (app_tx, app_rx) = kanal::unbounded_async::<SessionSnapshot>();
    let cancel = CancellationToken::new();

    let search = controller(
        Arc::new(FakeDictionary::new()),
        Arc::new(FakeSuggestions::default()),
    );
    let handle = tokio::spawn(event_loop(search, ui_rx, app_tx, cancel.clone()));

    wait_for(&app_rx, |_| true).await;
    cancel.cancel();

    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "event loop should stop on cancel");
}

#[tokio::test(start_paused = true)]
async fn test_no_op_events_publish_nothing() {
    let (ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (app_tx, app_rx) = kanal::unbounded_async::<SessionSnapshot>();

    let search = controller(
        Arc::new(FakeDictionary::new()),
        Arc::new(FakeSuggestions::default()),
    );
    let handle = tokio::spawn(event_loop(search, ui_rx, app_tx, CancellationToken::new()));
    wait_for(&app_rx, |_| true).await;

    // blank submit and re-enabling an enabled flag change nothing
    ui_tx.send(AppEvent::Submit).await.unwrap();
    ui_tx.send(AppEvent::SetSuggestionsEnabled(true)).await.unwrap();
    assert!(timeout(Duration::from_secs(1), app_rx.recv()).await.is_err());

    ui_tx.send(AppEvent::Close).await.unwrap();
    assert!(matches!(timeout(Duration::from_secs(2), handle).await, Ok(Ok(Ok(())))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_events_and_completions_are_never_lost() {
    const LOOKUPS: usize = 300;

    let (ui_tx, ui_rx) = kanal::bounded_async::<AppEvent>(64);
    let (app_tx, app_rx) = kanal::unbounded_async::<SessionSnapshot>();
    let cancel = CancellationToken::new();

    let dictionary = Arc::new(FakeDictionary::new());
    let search = controller(dictionary.clone(), Arc::new(FakeSuggestions::default()));
    let handle = tokio::spawn(event_loop(search, ui_rx, app_tx, cancel.clone()));
    wait_for(&app_rx, |_| true).await;

    // Steady stream of events competing with lookup completions
    let stop_noise = CancellationToken::new();
    let noise = {
        let ui_tx = ui_tx.clone();
        let stop = stop_noise.clone();
        tokio::spawn(async move {
            while !stop.is_cancelled() {
                if ui_tx
                    .send(AppEvent::SelectDictionary(DictionaryId::English))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        })
    };

    for i in 0..LOOKUPS {
        let word = format!("w{i}");
        ui_tx.send(AppEvent::QueryChanged(word.clone())).await.unwrap();
        ui_tx.send(AppEvent::Submit).await.unwrap();

        let done = wait_for(&app_rx, |s| s.phase == SearchPhase::Error && s.query == word).await;
        assert_eq!(done.error.unwrap().kind, LookupErrorKind::EmptyResults);
    }

    stop_noise.cancel();
    noise.await.unwrap();
    assert_eq!(dictionary.calls().len(), LOOKUPS);

    cancel.cancel();
    assert!(matches!(timeout(Duration::from_secs(2), handle).await, Ok(Ok(Ok(())))));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_presentation_closes_event_loop() {
    let (ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
    let (app_tx, app_rx) = kanal::unbounded_async::<SessionSnapshot>();

    let search = controller(
        Arc::new(FakeDictionary::new()),
        Arc::new(FakeSuggestions::default()),
    );
    let handle = tokio::spawn(event_loop(search, ui_rx, app_tx, CancellationToken::new()));
    wait_for(&app_rx, |_| true).await;

    drop(ui_tx);
    assert!(matches!(timeout(Duration::from_secs(2), handle).await, Ok(Ok(Ok(())))));
}

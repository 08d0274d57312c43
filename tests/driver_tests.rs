use callpulse::kernel::category::Category;
use callpulse::kernel::service::Service;
use callpulse::session::driver::{run_session, SourceEvent};
use callpulse::session::{CallSession, SessionUpdate, Speaker, TranscriptEvent, TranscriptionStatus};
use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn said(text: &str) -> SourceEvent {
    SourceEvent::Transcript(TranscriptEvent::finalized(Speaker::Prospect, text))
}

#[tokio::test]
async fn test_driver_processes_events_in_order() {
    let (source_tx, source_rx) = mpsc::channel(16);
    let (update_tx, mut update_rx) = mpsc::channel::<SessionUpdate>(16);

    let mut session = CallSession::default();
    session.start_call(Utc::now());
    let handle = tokio::spawn(run_session(session, source_rx, update_tx, CancellationToken::new()));

    // 1. Feed a short call, including noise the session must skip
    source_tx.send(said("my back is killing me")).await.unwrap();
    source_tx.send(SourceEvent::Transcript(TranscriptEvent::partial(Speaker::Prospect, "and I"))).await.unwrap();
    source_tx.send(said("   ")).await.unwrap();
    source_tx.send(said("and I'm exhausted, running on empty")).await.unwrap();
    drop(source_tx);

    // 2. Driver returns the session once the source closes
    let session = handle.await.expect("driver task");

    let mut updates = Vec::new();
    while let Some(update) = update_rx.recv().await {
        updates.push(update);
    }

    // blank final produces no update
    assert_eq!(updates.len(), 3);
    assert!(updates[0].recommendation.is_none());
    assert_eq!(updates[1].partial.as_deref(), Some("and I"));
    let last = updates.last().unwrap();
    assert_eq!(last.entries, 2);
    assert_eq!(last.recommendation.as_ref().map(|r| r.service), Some(Service::Restore));

    assert_eq!(session.engine().scores().get(Category::Pain), 40);
    assert_eq!(session.engine().scores().get(Category::Burnout), 40);
}

#[tokio::test]
async fn test_outage_mid_call_is_non_fatal() {
    let (source_tx, source_rx) = mpsc::channel(16);
    let (update_tx, mut update_rx) = mpsc::channel(16);

    let mut session = CallSession::default();
    session.start_call(Utc::now());
    let handle = tokio::spawn(run_session(session, source_rx, update_tx, CancellationToken::new()));

    source_tx.send(said("I'm exhausted and stressed")).await.unwrap();
    source_tx.send(SourceEvent::Unavailable { reason: "Transcription failed (503)".into() }).await.unwrap();
    source_tx.send(SourceEvent::Restored).await.unwrap();
    source_tx.send(said("can't keep up")).await.unwrap();
    drop(source_tx);

    let session = handle.await.expect("driver task");

    let first = update_rx.recv().await.expect("update");
    let outage = update_rx.recv().await.expect("update");
    assert_eq!(outage.status, TranscriptionStatus::Unavailable { reason: "Transcription failed (503)".into() });
    assert_eq!(outage.signals, first.signals, "outage must not touch signals");

    // 30 + 25
    assert_eq!(session.engine().scores().get(Category::Burnout), 55);
    assert!(session.status().is_available());
}

#[tokio::test]
async fn test_cancel_stops_driver_without_reset() {
    let (source_tx, source_rx) = mpsc::channel(16);
    let (update_tx, mut update_rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();

    let mut session = CallSession::default();
    session.start_call(Utc::now());
    let handle = tokio::spawn(run_session(session, source_rx, update_tx, cancel.clone()));

    source_tx.send(said("my back is killing me")).await.unwrap();
    let update = update_rx.recv().await.expect("first update");
    assert_eq!(update.entries, 1);

    cancel.cancel();
    let session = handle.await.expect("driver task");

    // The driver dropped its receiver on the way out and kept its scores.
    assert!(source_tx.is_closed());
    assert_eq!(session.engine().scores().get(Category::Pain), 40);
    assert_eq!(session.entries().len(), 1);
}

#[tokio::test]
async fn test_driver_keeps_scoring_without_renderer() {
    let (source_tx, source_rx) = mpsc::channel(16);
    let (update_tx, update_rx) = mpsc::channel(1);
    drop(update_rx);

    let mut session = CallSession::default();
    session.start_call(Utc::now());
    let handle = tokio::spawn(run_session(session, source_rx, update_tx, CancellationToken::new()));

    for _ in 0..3 {
        source_tx.send(said("so tired")).await.unwrap();
    }
    drop(source_tx);

    let session = handle.await.expect("driver task");
    assert_eq!(session.engine().scores().get(Category::Burnout), 45);
}

#[tokio::test]
async fn test_reset_mid_stream_starts_fresh_call() {
    let (source_tx, source_rx) = mpsc::channel(16);
    let (update_tx, mut update_rx) = mpsc::channel(16);

    let mut session = CallSession::default();
    session.start_call(Utc::now());
    let first_id = session.id();
    let handle = tokio::spawn(run_session(session, source_rx, update_tx, CancellationToken::new()));

    source_tx.send(said("my back is killing me and I'm exhausted")).await.unwrap();
    source_tx.send(SourceEvent::Reset).await.unwrap();
    source_tx.send(said("I want to start")).await.unwrap();
    drop(source_tx);

    let session = handle.await.expect("driver task");

    let before = update_rx.recv().await.expect("update");
    assert!(!before.signals.is_empty());

    let reset = update_rx.recv().await.expect("update");
    assert_ne!(reset.session_id, first_id);
    assert!(reset.signals.is_empty());
    assert!(reset.recommendation.is_none());
    assert_eq!(reset.entries, 0);

    // Only the post-reset utterance counts
    assert_eq!(session.engine().scores().get(Category::Pain), 0);
    assert_eq!(session.engine().scores().get(Category::Burnout), 0);
    // "want" + "start"
    assert_eq!(session.engine().scores().get(Category::Ready), 30);
    assert_eq!(session.entries().len(), 1);
}

#[tokio::test]
async fn test_export_attaches_summary() {
    let (source_tx, source_rx) = mpsc::channel(16);
    let (update_tx, mut update_rx) = mpsc::channel(16);

    let mut session = CallSession::default();
    session.start_call(Utc::now());
    let handle = tokio::spawn(run_session(session, source_rx, update_tx, CancellationToken::new()));

    source_tx.send(said("my back is killing me")).await.unwrap();
    source_tx.send(SourceEvent::Export).await.unwrap();
    drop(source_tx);

    let session = handle.await.expect("driver task");

    let scored = update_rx.recv().await.expect("update");
    assert!(scored.summary.is_none());

    let exported = update_rx.recv().await.expect("update");
    let summary = exported.summary.expect("summary on export");
    assert_eq!(summary.session_id, session.id());
    assert_eq!(summary.transcript.len(), 1);
    assert_eq!(summary.signals, scored.signals);

    // Export is read-only
    assert_eq!(session.engine().scores().get(Category::Pain), 40);
}

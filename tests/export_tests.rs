use callpulse::kernel::config::{EngineConfig, RecommendationMode};
use callpulse::session::export::{format_duration, format_summary, to_json, CallSummary};
use callpulse::session::{CallSession, Speaker, TranscriptEvent};
use chrono::{Duration, TimeZone, Utc};

#[test]
fn test_duration_format() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(7), "0:07");
    assert_eq!(format_duration(185), "3:05");
    assert_eq!(format_duration(3600), "60:00");
}

#[test]
fn test_empty_call_summary() {
    let start = Utc.with_ymd_and_hms(2026, 5, 4, 14, 30, 0).unwrap();
    let mut session = CallSession::default();
    session.start_call(start);

    let text = format_summary(&session.summary(start + Duration::seconds(12)));

    assert!(text.starts_with(&format!("CALL SUMMARY {}\n", session.id())));
    assert!(text.contains("Started: 2026-05-04 14:30 UTC"));
    assert!(text.contains("Duration: 0:12"));
    assert!(text.contains("Readiness: 20% (Early conversation)"));
    assert!(text.contains("- none detected"));
    assert!(text.contains("- not enough signal yet"));
    assert!(!text.contains("TRANSCRIPT"));
}

#[test]
fn test_summary_lists_signals_and_recommendation() {
    let start = Utc.with_ymd_and_hms(2026, 5, 4, 14, 30, 0).unwrap();
    let mut session = CallSession::default();
    session.start_call(start);
    session.handle_transcript(TranscriptEvent::finalized(Speaker::Caller, "How have you been?"), start + Duration::seconds(3));
    session.handle_transcript(
        TranscriptEvent::finalized(Speaker::Prospect, "My back is killing me and I'm exhausted"),
        start + Duration::seconds(9),
    );
    session.mark_unavailable("Transcription failed (500)");
    session.end_call(start + Duration::seconds(65));

    let text = format_summary(&session.summary(start + Duration::seconds(600)));

    assert!(text.contains("Duration: 1:05"));
    assert!(text.contains("Transcription unavailable: Transcription failed (500)"));
    assert!(text.contains("- Physical Discomfort (40%): "));
    assert!(text.contains("- Physiotherapy / Restore (41% confidence)"));
    assert!(text.contains("  Reason: They're experiencing physical discomfort (40%) combined with burnout signs (15%)."));
    assert!(text.contains("  Suggested approach: It sounds like your body"));
    assert!(text.contains("[14:30:03] Caller: How have you been?"));
    assert!(text.contains("[14:30:09] Prospect: My back is killing me and I'm exhausted"));
}

#[test]
fn test_ranked_summary_lists_every_candidate() {
    let config = EngineConfig { mode: RecommendationMode::Ranked, ..EngineConfig::default() };
    let mut session = CallSession::new(config);
    session.start_call(Utc::now());
    session.handle_transcript(TranscriptEvent::finalized(Speaker::Prospect, "my back is killing me"), Utc::now());
    session.handle_transcript(TranscriptEvent::finalized(Speaker::Prospect, "I feel anxious and out of place"), Utc::now());

    let text = format_summary(&session.summary(Utc::now()));
    assert!(text.contains("- Mental Health (32% confidence)"));
    assert!(text.contains("- Physiotherapy / Restore (30% confidence)"));
    assert!(text.contains("- Private Training / Vault (26% confidence)"));
}

#[test]
fn test_json_export() {
    let mut session = CallSession::default();
    session.start_call(Utc::now());
    session.handle_transcript(TranscriptEvent::finalized(Speaker::Prospect, "I'm exhausted, running on empty"), Utc::now());

    let json = to_json(&session.summary(Utc::now())).expect("serialize");
    let parsed: CallSummary = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(parsed.session_id, session.id());
    assert_eq!(parsed.signals.len(), 1);
    assert!(json.contains("\"category\": \"burnout\""));
    assert!(json.contains("\"state\": \"available\""));
}

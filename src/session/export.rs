use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use std::fmt::Write;
use uuid::Uuid;

use crate::kernel::recommend::Recommendation;
use crate::kernel::signal::Signal;

use super::transcript::{TranscriptEntry, TranscriptionStatus};

/// Everything worth keeping from a call, ready for a CRM note or clipboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSummary {
    pub session_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_secs: u64,
    pub readiness: u32,
    pub readiness_label: String,
    pub signals: Vec<Signal>,
    pub recommendation: Option<Recommendation>,
    pub recommendations: Vec<Recommendation>,
    pub status: TranscriptionStatus,
    pub transcript: Vec<TranscriptEntry>,
}

/// `m:ss`
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Plain-text block for pasting into a CRM.
pub fn format_summary(summary: &CallSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "CALL SUMMARY {}", summary.session_id);
    if let Some(started) = summary.started_at {
        let _ = writeln!(out, "Started: {}", started.format("%Y-%m-%d %H:%M UTC"));
    }
    let _ = writeln!(out, "Duration: {}", format_duration(summary.duration_secs));
    let _ = writeln!(out, "Readiness: {}% ({})", summary.readiness, summary.readiness_label);
    if let TranscriptionStatus::Unavailable { reason } = &summary.status {
        let _ = writeln!(out, "Transcription unavailable: {}", reason);
    }

    out.push_str("\nSIGNALS\n");
    if summary.signals.is_empty() {
        out.push_str("- none detected\n");
    }
    for signal in &summary.signals {
        let _ = writeln!(out, "- {} ({}%): {}", signal.label, signal.intensity, signal.description);
    }

    // Ranked mode fills `recommendations`; single mode fills `recommendation`.
    let recommendations: Vec<&Recommendation> = if summary.recommendations.is_empty() {
        summary.recommendation.iter().collect()
    } else {
        summary.recommendations.iter().collect()
    };

    out.push_str("\nRECOMMENDATION\n");
    if recommendations.is_empty() {
        out.push_str("- not enough signal yet\n");
    }
    for rec in recommendations {
        let _ = writeln!(out, "- {} ({}% confidence)", rec.service.display_name(), rec.confidence);
        let _ = writeln!(out, "  Reason: {}", rec.reason);
        let _ = writeln!(out, "  Suggested approach: {}", rec.suggested_approach);
    }

    if !summary.transcript.is_empty() {
        out.push_str("\nTRANSCRIPT\n");
        for entry in &summary.transcript {
            let _ = writeln!(out, "[{}] {}: {}", entry.timestamp.format("%H:%M:%S"), entry.speaker.label(), entry.text);
        }
    }

    out
}

pub fn to_json(summary: &CallSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

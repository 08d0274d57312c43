use std::collections::{BTreeMap, VecDeque};
use super::event::{TelemetryEvent, TranscriptionEventKind};
use crate::kernel::category::Category;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub utterance_stats: UtteranceStats,
    pub signal_stats: SignalStats,
    pub recommendation_stats: RecommendationStats,
    pub transcription_stats: TranscriptionStats,
    pub resets: u64,
}

#[derive(Debug, Clone, Default)]
pub struct UtteranceStats {
    pub ingested: u64,
    pub empty: u64,
    pub keyword_hits: u64,
    pub phrase_hits: u64,
    /// Utterances that matched nothing at all.
    pub silent: u64,
    pub avg_hits_per_utterance: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SignalStats {
    pub surfaced: BTreeMap<Category, u64>,
    pub saturated: BTreeMap<Category, u64>,
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationStats {
    pub changes: u64,
    pub max_confidence: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptionStats {
    pub outages: u64,
    pub restorations: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::UtteranceIngested { keyword_hits, phrase_hits, .. } => {
                snap.utterance_stats.ingested += 1;
                snap.utterance_stats.keyword_hits += *keyword_hits as u64;
                snap.utterance_stats.phrase_hits += *phrase_hits as u64;
                if keyword_hits + phrase_hits == 0 {
                    snap.utterance_stats.silent += 1;
                }
            }
            TelemetryEvent::EmptyUtterance => snap.utterance_stats.empty += 1,
            TelemetryEvent::SignalSurfaced { category, .. } => {
                *snap.signal_stats.surfaced.entry(*category).or_insert(0) += 1;
            }
            TelemetryEvent::SignalSaturated { category } => {
                *snap.signal_stats.saturated.entry(*category).or_insert(0) += 1;
            }
            TelemetryEvent::RecommendationChanged { confidence, .. } => {
                snap.recommendation_stats.changes += 1;
                snap.recommendation_stats.max_confidence = snap.recommendation_stats.max_confidence.max(*confidence);
            }
            TelemetryEvent::Reset { .. } => snap.resets += 1,
            TelemetryEvent::Transcription(kind) => match kind {
                TranscriptionEventKind::Unavailable => snap.transcription_stats.outages += 1,
                TranscriptionEventKind::Restored => snap.transcription_stats.restorations += 1,
            },
        }
    }

    if snap.utterance_stats.ingested > 0 {
        let hits = snap.utterance_stats.keyword_hits + snap.utterance_stats.phrase_hits;
        snap.utterance_stats.avg_hits_per_utterance = hits as f64 / snap.utterance_stats.ingested as f64;
    }

    snap
}

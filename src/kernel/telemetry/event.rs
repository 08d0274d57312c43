use serde::{Serialize, Deserialize};
use crate::kernel::category::Category;
use crate::kernel::service::Service;

// Allowed: Categories, Services, Counts, Scores
// Forbidden: Utterance text, matched words

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    UtteranceIngested {
        ordinal: u64,
        keyword_hits: u32,
        phrase_hits: u32,
    },

    /// Empty or whitespace-only input. Scores untouched.
    EmptyUtterance,

    /// A category crossed the display threshold for the first time this call.
    SignalSurfaced {
        category: Category,
        intensity: u32,
    },

    /// A category reached the score cap.
    SignalSaturated {
        category: Category,
    },

    RecommendationChanged {
        from: Option<Service>,
        to: Service,
        confidence: u32,
    },

    Reset {
        utterances: u64,
    },

    Transcription(TranscriptionEventKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptionEventKind {
    Unavailable,
    Restored,
}

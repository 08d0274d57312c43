use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The person running the call.
    #[default]
    Caller,
    Prospect,
}

impl Speaker {
    pub fn toggle(self) -> Self {
        match self {
            Speaker::Caller => Speaker::Prospect,
            Speaker::Prospect => Speaker::Caller,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speaker::Caller => "Caller",
            Speaker::Prospect => "Prospect",
        }
    }
}

/// One result from the transcription collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEvent {
    pub text: String,
    /// Interim results are display-only and never scored.
    pub is_final: bool,
    pub speaker: Speaker,
}

impl TranscriptEvent {
    pub fn finalized(speaker: Speaker, text: impl Into<String>) -> Self {
        Self { text: text.into(), is_final: true, speaker }
    }

    pub fn partial(speaker: Speaker, text: impl Into<String>) -> Self {
        Self { text: text.into(), is_final: false, speaker }
    }

    /// Final, with something other than whitespace in it.
    pub fn is_scorable(&self) -> bool {
        self.is_final && !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Whether the transcription collaborator is currently delivering.
/// An outage never touches engine scores.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TranscriptionStatus {
    #[default]
    Available,
    Unavailable { reason: String },
}

impl TranscriptionStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, TranscriptionStatus::Available)
    }
}

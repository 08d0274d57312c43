use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::kernel::config::{EngineConfig, RecommendationMode};
use crate::kernel::engine::SignalEngine;
use crate::kernel::recommend::Recommendation;
use crate::kernel::service::Service;
use crate::kernel::signal::Signal;
use crate::kernel::telemetry::event::{TelemetryEvent, TranscriptionEventKind};

use super::driver::SourceEvent;
use super::export::CallSummary;
use super::readiness::{overall_readiness, readiness_label};
use super::transcript::{Speaker, TranscriptEntry, TranscriptEvent, TranscriptionStatus};

/// What the host renders after each accepted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub session_id: Uuid,
    pub signals: Vec<Signal>,
    pub recommendation: Option<Recommendation>,
    pub recommendations: Vec<Recommendation>,
    pub readiness: u32,
    pub status: TranscriptionStatus,
    pub partial: Option<String>,
    pub entries: usize,
    pub speaker: Speaker,
    /// Only set in answer to an export request.
    pub summary: Option<CallSummary>,
}

/// One live (or replayed) call: the engine plus everything the dashboard shows.
#[derive(Debug)]
pub struct CallSession {
    id: Uuid,
    engine: SignalEngine,
    current_speaker: Speaker,
    entries: Vec<TranscriptEntry>,
    partial: Option<String>,
    signals: Vec<Signal>,
    recommendation: Option<Recommendation>,
    recommendations: Vec<Recommendation>,
    status: TranscriptionStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl CallSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            engine: SignalEngine::new(config),
            current_speaker: Speaker::Caller,
            entries: Vec::new(),
            partial: None,
            signals: Vec::new(),
            recommendation: None,
            recommendations: Vec::new(),
            status: TranscriptionStatus::Available,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn status(&self) -> &TranscriptionStatus {
        &self.status
    }

    pub fn partial(&self) -> Option<&str> {
        self.partial.as_deref()
    }

    pub fn current_speaker(&self) -> Speaker {
        self.current_speaker
    }

    pub fn set_speaker(&mut self, speaker: Speaker) {
        self.current_speaker = speaker;
    }

    pub fn toggle_speaker(&mut self) -> Speaker {
        self.current_speaker = self.current_speaker.toggle();
        self.current_speaker
    }

    pub fn is_live(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// Begin a new call. Always resets the engine so nothing leaks from the previous call.
    pub fn start_call(&mut self, now: DateTime<Utc>) {
        self.id = Uuid::new_v4();
        self.engine.reset();
        self.entries.clear();
        self.partial = None;
        self.signals.clear();
        self.recommendation = None;
        self.recommendations.clear();
        self.status = TranscriptionStatus::Available;
        self.started_at = Some(now);
        self.ended_at = None;
        info!(session = %self.id, "Call started");
    }

    pub fn end_call(&mut self, now: DateTime<Utc>) {
        self.partial = None;
        self.ended_at = Some(now);
        info!(session = %self.id, entries = self.entries.len(), "Call ended");
    }

    pub fn handle(&mut self, event: SourceEvent, now: DateTime<Utc>) -> Option<SessionUpdate> {
        match event {
            SourceEvent::Transcript(transcript) => {
                self.current_speaker = transcript.speaker;
                self.handle_transcript(transcript, now)
            }
            SourceEvent::Spoken { text, is_final } => {
                let transcript = TranscriptEvent { text, is_final, speaker: self.current_speaker };
                self.handle_transcript(transcript, now)
            }
            SourceEvent::SwitchSpeaker => {
                self.toggle_speaker();
                Some(self.update())
            }
            SourceEvent::Unavailable { reason } => Some(self.mark_unavailable(reason)),
            SourceEvent::Restored => Some(self.mark_restored()),
            SourceEvent::Reset => {
                self.start_call(now);
                Some(self.update())
            }
            SourceEvent::Export => {
                let mut update = self.update();
                update.summary = Some(self.summary(now));
                Some(update)
            }
        }
    }

    /// Feed one transcription result. Interim text only updates the partial line;
    /// finalized text that is blank is dropped without an update.
    pub fn handle_transcript(&mut self, event: TranscriptEvent, now: DateTime<Utc>) -> Option<SessionUpdate> {
        if !event.is_final {
            self.partial = Some(event.text).filter(|t| !t.trim().is_empty());
            return Some(self.update());
        }
        if !event.is_scorable() {
            return None;
        }

        let text = event.text.trim().to_string();
        self.entries.push(TranscriptEntry {
            id: format!("entry-{}", self.entries.len()),
            speaker: event.speaker,
            text: text.clone(),
            timestamp: now,
        });
        self.partial = None;

        self.signals = self.engine.ingest_utterance(&text);
        self.refresh_recommendation();

        Some(self.update())
    }

    /// Transcription dropped out. Scores and transcript are left as they are.
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) -> SessionUpdate {
        let reason = reason.into();
        warn!(session = %self.id, %reason, "Transcription unavailable");
        if self.status.is_available() {
            self.engine.record(TelemetryEvent::Transcription(TranscriptionEventKind::Unavailable));
        }
        self.status = TranscriptionStatus::Unavailable { reason };
        self.partial = None;
        self.update()
    }

    pub fn mark_restored(&mut self) -> SessionUpdate {
        if !self.status.is_available() {
            info!(session = %self.id, "Transcription restored");
            self.engine.record(TelemetryEvent::Transcription(TranscriptionEventKind::Restored));
        }
        self.status = TranscriptionStatus::Available;
        self.update()
    }

    pub fn overall_readiness(&self) -> u32 {
        overall_readiness(&self.signals)
    }

    pub fn readiness_label(&self) -> &'static str {
        readiness_label(self.overall_readiness())
    }

    /// Seconds between call start and `now` (or the end of the call, if it ended).
    pub fn duration_secs(&self, now: DateTime<Utc>) -> u64 {
        match self.started_at {
            Some(start) => {
                let end = self.ended_at.unwrap_or(now);
                (end - start).num_seconds().max(0) as u64
            }
            None => 0,
        }
    }

    pub fn summary(&self, now: DateTime<Utc>) -> CallSummary {
        let readiness = self.overall_readiness();
        CallSummary {
            session_id: self.id,
            started_at: self.started_at,
            duration_secs: self.duration_secs(now),
            readiness,
            readiness_label: readiness_label(readiness).to_string(),
            signals: self.signals.clone(),
            recommendation: self.recommendation.clone(),
            recommendations: self.recommendations.clone(),
            status: self.status.clone(),
            transcript: self.entries.clone(),
        }
    }

    pub fn update(&self) -> SessionUpdate {
        SessionUpdate {
            session_id: self.id,
            signals: self.signals.clone(),
            recommendation: self.recommendation.clone(),
            recommendations: self.recommendations.clone(),
            readiness: self.overall_readiness(),
            status: self.status.clone(),
            partial: self.partial.clone(),
            entries: self.entries.len(),
            speaker: self.current_speaker,
            summary: None,
        }
    }

    // A null result keeps whatever was displayed before.
    fn refresh_recommendation(&mut self) {
        match self.engine.config().mode {
            RecommendationMode::Single => {
                if let Some(next) = self.engine.recommend() {
                    self.note_change(self.recommendation.as_ref().map(|r| r.service), &next);
                    self.recommendation = Some(next);
                }
            }
            RecommendationMode::Ranked => {
                let next = self.engine.recommend_ranked();
                if let Some(top) = next.first() {
                    self.note_change(self.recommendations.first().map(|r| r.service), top);
                    self.recommendations = next;
                }
            }
        }
    }

    fn note_change(&mut self, previous: Option<Service>, next: &Recommendation) {
        if previous == Some(next.service) {
            return;
        }
        info!(
            session = %self.id,
            service = %next.service,
            confidence = next.confidence,
            "Recommendation changed"
        );
        self.engine.record(TelemetryEvent::RecommendationChanged {
            from: previous,
            to: next.service,
            confidence: next.confidence,
        });
    }
}

impl Default for CallSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

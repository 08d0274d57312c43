use tracing::{debug, info};

use super::category::{CategoryPatterns, PATTERNS};
use super::config::EngineConfig;
use super::recommend::{self, Recommendation};
use super::signal::{derive_signals, Signal};
use super::state::{ConversationHistory, EngineState, ScoreState, StateDelta};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;

/// Incremental signal detector for a single call.
///
/// Owned by the host call session: construct at call start, `reset` between calls.
/// Not internally synchronized; callers feed utterances in spoken order.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: EngineConfig,
    patterns: &'static [CategoryPatterns],
    state: EngineState,
    pub telemetry: TelemetryRecorder,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: EngineState::new(config.score_cap),
            config,
            patterns: &PATTERNS,
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scores(&self) -> &ScoreState {
        &self.state.scores
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.state.history
    }

    /// Mutation counter of the underlying state.
    pub fn version(&self) -> u64 {
        self.state.version
    }

    /// Current signal list without ingesting anything.
    pub fn signals(&self) -> Vec<Signal> {
        derive_signals(&self.state.scores, &self.state.history, &self.config)
    }

    /// Score one finalized utterance and return the full current signal list.
    /// Empty or whitespace-only text changes nothing.
    pub fn ingest_utterance(&mut self, text: &str) -> Vec<Signal> {
        if text.trim().is_empty() {
            self.telemetry.record(TelemetryEvent::EmptyUtterance);
            return self.signals();
        }

        let normalized = text.to_lowercase();
        let before = self.state.scores.clone();

        let mut deltas = Vec::new();
        let mut keyword_hits = 0u32;
        let mut phrase_hits = 0u32;

        for patterns in self.patterns {
            let hit = patterns.matches(&normalized);
            if hit.is_empty() {
                continue;
            }
            keyword_hits += hit.keywords.len() as u32;
            phrase_hits += hit.phrases.len() as u32;
            debug!(
                category = %patterns.category,
                keywords = hit.keywords.len(),
                phrases = hit.phrases.len(),
                "Pattern hits"
            );
            deltas.push(StateDelta::ScoreRaised {
                category: patterns.category,
                increment: hit.increment(),
            });
        }

        self.state.reduce(StateDelta::UtteranceRecorded(normalized));
        for delta in deltas {
            self.state.reduce(delta);
        }

        self.telemetry.record(TelemetryEvent::UtteranceIngested {
            ordinal: self.state.history.len() as u64,
            keyword_hits,
            phrase_hits,
        });

        let threshold = self.config.display_threshold;
        for (category, score) in self.state.scores.iter() {
            let previous = before.get(category);
            if previous <= threshold && score > threshold {
                self.telemetry.record(TelemetryEvent::SignalSurfaced { category, intensity: score });
            }
            if !before.is_saturated(category) && self.state.scores.is_saturated(category) {
                self.telemetry.record(TelemetryEvent::SignalSaturated { category });
            }
        }

        self.signals()
    }

    /// Single-best recommendation, or `None` while evidence is too thin.
    pub fn recommend(&self) -> Option<Recommendation> {
        recommend::best(&self.state.scores, &self.config)
    }

    /// Every service clearing the ranked floor, best first.
    pub fn recommend_ranked(&self) -> Vec<Recommendation> {
        recommend::ranked(&self.state.scores, &self.config)
    }

    /// Start a new call: history and every score back to zero. Telemetry is kept.
    pub fn reset(&mut self) {
        let utterances = self.state.history.len() as u64;
        self.state.reduce(StateDelta::Cleared);
        self.telemetry.record(TelemetryEvent::Reset { utterances });
        info!(utterances, "Signal engine reset");
    }

    /// Host-side observations (recommendation changes, transcription outages).
    pub fn record(&mut self, event: TelemetryEvent) {
        self.telemetry.record(event);
    }
}

use serde::{Serialize, Deserialize};

use super::category::Category;
use super::config::EngineConfig;
use super::state::{ConversationHistory, ScoreState};

/// A category whose score currently clears the display threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub category: Category,
    pub label: String,
    pub description: String,
    pub intensity: u32,
}

/// Derive the displayable signal list from current scores.
/// Sorted by intensity (desc), ties by category declaration order.
pub fn derive_signals(scores: &ScoreState, history: &ConversationHistory, config: &EngineConfig) -> Vec<Signal> {
    let mut signals: Vec<Signal> = scores
        .iter()
        .filter(|(_, score)| *score > config.display_threshold)
        .map(|(category, score)| Signal {
            category,
            label: category.label().to_string(),
            description: describe(category, history, config.history_window),
            intensity: score,
        })
        .collect();

    // Stable sort keeps declaration order for equal intensities.
    signals.sort_by(|a, b| b.intensity.cmp(&a.intensity));
    signals
}

/// Fixed category sentence, plus the most recent evidence found in the history window.
pub fn describe(category: Category, history: &ConversationHistory, window: usize) -> String {
    let base = category.description();
    let evidence = history
        .recent(window)
        .iter()
        .rev()
        .find_map(|utterance| category.patterns().first_hit(utterance));

    match evidence {
        Some(hit) => format!("{} (recently mentioned \"{}\")", base, hit),
        None => base.to_string(),
    }
}

use serde::{Serialize, Deserialize};
use super::category::Category;

/// Per-category saturating accumulators.
///
/// Serialize-only: values can only enter through `apply` or `from_scores`,
/// both of which clamp to the cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    scores: [u32; 6],
    cap: u32,
}

impl ScoreState {
    pub fn new(cap: u32) -> Self {
        Self { scores: [0; 6], cap }
    }

    /// Build a state from explicit values (clamped to the cap). Mostly useful for hosts
    /// replaying a known snapshot and for tests.
    pub fn from_scores(cap: u32, values: &[(Category, u32)]) -> Self {
        let mut state = Self::new(cap);
        for (category, value) in values {
            state.scores[category.index()] = (*value).min(cap);
        }
        state
    }

    pub fn get(&self, category: Category) -> u32 {
        self.scores[category.index()]
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn total(&self) -> u32 {
        self.scores.iter().sum()
    }

    /// Scores in category declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.scores[c.index()]))
    }

    /// Saturating add. Returns the new score.
    pub fn apply(&mut self, category: Category, increment: u32) -> u32 {
        let slot = &mut self.scores[category.index()];
        *slot = slot.saturating_add(increment).min(self.cap);
        *slot
    }

    pub fn is_saturated(&self, category: Category) -> bool {
        self.get(category) >= self.cap
    }

    fn clear(&mut self) {
        self.scores = [0; 6];
    }
}

/// Append-only log of normalized utterances. Feeds descriptions, never scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    entries: Vec<String>,
}

impl ConversationHistory {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

/// Strict state delta. This is the ONLY way engine state mutates.
#[derive(Debug, Clone, PartialEq)]
pub enum StateDelta {
    UtteranceRecorded(String),
    ScoreRaised { category: Category, increment: u32 },
    Cleared,
}

#[derive(Debug, Clone)]
pub struct EngineState {
    pub scores: ScoreState,
    pub history: ConversationHistory,
    /// Monotonic mutation counter. Survives `Cleared` so observers can tell calls apart.
    pub version: u64,
}

impl EngineState {
    pub fn new(cap: u32) -> Self {
        Self {
            scores: ScoreState::new(cap),
            history: ConversationHistory::default(),
            version: 0,
        }
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::UtteranceRecorded(text) => {
                self.history.entries.push(text);
            }
            StateDelta::ScoreRaised { category, increment } => {
                self.scores.apply(category, increment);
            }
            StateDelta::Cleared => {
                self.scores.clear();
                self.history.entries.clear();
            }
        }
    }
}

use serde::{Serialize, Deserialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};

/// Which recommendation contract a host consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    /// One best-fit service, or nothing.
    #[default]
    Single,
    /// Every service clearing `ranked_fit_floor`, best first.
    Ranked,
}

/// Tunable thresholds. Defaults reproduce the stock dashboard behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scores strictly above this surface as signals.
    pub display_threshold: u32,
    /// Sum of all category scores required before recommending anything.
    pub min_total_score: u32,
    /// Best fit score required in single mode.
    pub min_fit_score: f64,
    /// Confidence is never reported above this.
    pub confidence_ceiling: u32,
    /// Saturation point of every category score.
    pub score_cap: u32,
    /// How many recent utterances feed signal descriptions.
    pub history_window: usize,
    /// Fit score a service needs to appear in ranked mode.
    pub ranked_fit_floor: f64,
    pub max_candidates: usize,
    pub mode: RecommendationMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_threshold: 20,
            min_total_score: 50,
            min_fit_score: 30.0,
            confidence_ceiling: 95,
            score_cap: 100,
            history_window: 3,
            ranked_fit_floor: 20.0,
            max_candidates: 4,
            mode: RecommendationMode::Single,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.score_cap == 0 {
            return Err(ConfigError::Invalid("score_cap must be greater than 0".into()));
        }
        if self.confidence_ceiling > 100 {
            return Err(ConfigError::Invalid("confidence_ceiling must be at most 100".into()));
        }
        if self.display_threshold >= self.score_cap {
            return Err(ConfigError::Invalid(format!(
                "display_threshold ({}) must be below score_cap ({})",
                self.display_threshold, self.score_cap
            )));
        }
        if !(self.min_fit_score.is_finite() && self.min_fit_score >= 0.0) {
            return Err(ConfigError::Invalid("min_fit_score must be a non-negative number".into()));
        }
        if !(self.ranked_fit_floor.is_finite() && self.ranked_fit_floor >= 0.0) {
            return Err(ConfigError::Invalid("ranked_fit_floor must be a non-negative number".into()));
        }
        if self.history_window == 0 {
            return Err(ConfigError::Invalid("history_window must be at least 1".into()));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Invalid("max_candidates must be at least 1".into()));
        }
        Ok(())
    }
}

use serde::{Serialize, Deserialize};

use super::config::EngineConfig;
use super::service::{fit_score, fit_tenths, Service};
use super::state::ScoreState;
use super::templates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub service: Service,
    /// 0..=confidence_ceiling
    pub confidence: u32,
    pub reason: String,
    pub suggested_approach: String,
}

/// Fit score for every service, in declaration order.
pub fn fit_scores(scores: &ScoreState) -> Vec<(Service, f64)> {
    Service::ALL.iter().map(|s| (*s, fit_score(*s, scores))).collect()
}

/// `round(fit / 2)` with halves rounding up, then clamped to the ceiling.
pub fn confidence_for(fit: f64, ceiling: u32) -> u32 {
    let tenths = (fit * 10.0).round().max(0.0) as u32;
    confidence_from_tenths(tenths, ceiling)
}

/// Integer form of `confidence_for`: `floor((tenths / 10) / 2 + 1/2)`.
pub fn confidence_from_tenths(fit_tenths: u32, ceiling: u32) -> u32 {
    ((fit_tenths + 10) / 20).min(ceiling)
}

/// Single-best contract. `None` is a normal steady state, not an error.
pub fn best(scores: &ScoreState, config: &EngineConfig) -> Option<Recommendation> {
    if scores.total() < config.min_total_score {
        return None;
    }

    // Strict `>` keeps the earliest declared service on ties.
    let mut winner: Option<(Service, f64)> = None;
    for (service, fit) in fit_scores(scores) {
        let better = match winner {
            Some((_, best_fit)) => fit > best_fit,
            None => true,
        };
        if better {
            winner = Some((service, fit));
        }
    }

    let (service, fit) = winner?;
    if fit < config.min_fit_score {
        return None;
    }

    Some(build(service, scores, config))
}

/// Multi-candidate contract: every service clearing `ranked_fit_floor`, best first.
pub fn ranked(scores: &ScoreState, config: &EngineConfig) -> Vec<Recommendation> {
    if scores.total() < config.min_total_score {
        return Vec::new();
    }

    let mut candidates: Vec<(Service, f64)> = fit_scores(scores)
        .into_iter()
        .filter(|(_, fit)| *fit >= config.ranked_fit_floor)
        .collect();

    // Stable sort: equal fits stay in declaration order.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    candidates
        .into_iter()
        .take(config.max_candidates)
        .map(|(service, _)| build(service, scores, config))
        .collect()
}

fn build(service: Service, scores: &ScoreState, config: &EngineConfig) -> Recommendation {
    let rationale = templates::render(service, scores);
    Recommendation {
        service,
        confidence: confidence_from_tenths(fit_tenths(service, scores), config.confidence_ceiling),
        reason: rationale.reason,
        suggested_approach: rationale.approach,
    }
}

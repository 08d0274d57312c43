use serde::{Serialize, Deserialize};

use super::category::Category;
use super::state::ScoreState;

/// Business offerings the engine can recommend.
/// Declaration order breaks ties between equal fit scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Restore,
    Mental,
    Nutrition,
    Vault,
    Forge,
}

/// Which categories a service draws evidence from, and how strongly.
#[derive(Debug)]
pub struct ServiceProfile {
    pub service: Service,
    pub categories: &'static [Category],
    /// Multiplier in tenths (15 = x1.5), applied uniformly to every category of the service.
    pub weight_tenths: u32,
}

impl ServiceProfile {
    pub fn weight(&self) -> f64 {
        self.weight_tenths as f64 / 10.0
    }
}

pub static PROFILES: [ServiceProfile; 5] = [
    ServiceProfile { service: Service::Restore, categories: &[Category::Pain, Category::Burnout], weight_tenths: 15 },
    ServiceProfile { service: Service::Mental, categories: &[Category::Burnout, Category::Emotional], weight_tenths: 16 },
    ServiceProfile { service: Service::Nutrition, categories: &[Category::Nutrition, Category::Burnout], weight_tenths: 14 },
    ServiceProfile { service: Service::Vault, categories: &[Category::Emotional, Category::Ready], weight_tenths: 13 },
    ServiceProfile { service: Service::Forge, categories: &[Category::Consistency, Category::Ready], weight_tenths: 12 },
];

impl Service {
    pub const ALL: [Service; 5] = [
        Service::Restore,
        Service::Mental,
        Service::Nutrition,
        Service::Vault,
        Service::Forge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Restore => "restore",
            Service::Mental => "mental",
            Service::Nutrition => "nutrition",
            Service::Vault => "vault",
            Service::Forge => "forge",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Service::Restore => "Physiotherapy / Restore",
            Service::Mental => "Mental Health",
            Service::Nutrition => "Nutrition",
            Service::Vault => "Private Training / Vault",
            Service::Forge => "Community / Forge",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Service::Restore => "Heal gently, move with intention",
            Service::Mental => "Space to process, tools to grow",
            Service::Nutrition => "Nourish your gut, nourish your life",
            Service::Vault => "Your pace, your space, your growth",
            Service::Forge => "Strength through belonging",
        }
    }

    pub fn profile(self) -> &'static ServiceProfile {
        &PROFILES[self as usize]
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted sum of the service's category scores, in tenths of a point.
/// Integer so that fits like `45 * 1.4 = 63` stay exact through rounding.
pub fn fit_tenths(service: Service, scores: &ScoreState) -> u32 {
    let profile = service.profile();
    let sum: u32 = profile.categories.iter().map(|c| scores.get(*c)).sum();
    sum * profile.weight_tenths
}

/// Weighted sum of the service's category scores.
pub fn fit_score(service: Service, scores: &ScoreState) -> f64 {
    fit_tenths(service, scores) as f64 / 10.0
}

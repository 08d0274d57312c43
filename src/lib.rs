pub mod kernel;
pub mod session;

// Engine surface most hosts need.
pub use kernel::engine::SignalEngine;
pub use kernel::config::{EngineConfig, RecommendationMode};
pub use kernel::category::Category;
pub use kernel::service::Service;
pub use kernel::signal::Signal;
pub use kernel::recommend::Recommendation;

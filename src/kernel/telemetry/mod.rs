//! Engine telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside scoring or recommendation logic.
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain what was said.
//! Only categories, services, counts and scores are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

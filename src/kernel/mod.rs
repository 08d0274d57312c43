pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod recommend;
pub mod service;
pub mod signal;
pub mod state;
pub mod telemetry;
pub mod templates;

//! Host-side glue around the signal engine: transcript events in,
//! renderable snapshots and CRM export out.

pub mod call;
pub mod console;
pub mod driver;
pub mod export;
pub mod readiness;
pub mod transcript;

pub use call::{CallSession, SessionUpdate};
pub use transcript::{Speaker, TranscriptEntry, TranscriptEvent, TranscriptionStatus};

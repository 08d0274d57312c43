use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::call::{CallSession, SessionUpdate};
use super::transcript::TranscriptEvent;

/// Everything the transcription collaborator or the operator can tell the session,
/// in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// Attributed text. Its speaker becomes the session's current speaker.
    Transcript(TranscriptEvent),
    /// Unattributed text, credited to the session's current speaker.
    Spoken { text: String, is_final: bool },
    SwitchSpeaker,
    /// Microphone denied, service down, network error. Non-fatal.
    Unavailable { reason: String },
    Restored,
    /// Start a fresh call on the same session.
    Reset,
    /// Attach a call summary to the next update.
    Export,
}

/// Async driver loop.
///
/// Applies source events strictly in the order received and forwards a snapshot after
/// every accepted event. Returns the session when the source closes or `cancel` fires;
/// stopping never resets scores, so the caller can still export the call.
pub async fn run_session(
    mut session: CallSession,
    mut source: mpsc::Receiver<SourceEvent>,
    updates: mpsc::Sender<SessionUpdate>,
    cancel: CancellationToken,
) -> CallSession {
    info!(session = %session.id(), "Session driver started");

    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Session driver cancelled");
                break;
            }
            event = source.recv() => event,
        };

        let Some(event) = event else {
            debug!("Transcription source closed");
            break;
        };

        if let Some(update) = session.handle(event, Utc::now()) {
            // The renderer going away is not a reason to stop scoring.
            let _ = updates.send(update).await;
        }
    }

    info!(session = %session.id(), entries = session.entries().len(), "Session driver stopped");
    session
}

use super::driver::SourceEvent;
use super::transcript::{Speaker, TranscriptEvent};

/// Turn one console line into a source event.
///
/// ```text
/// caller: text        finalized utterance from the caller
/// prospect: text      finalized utterance from the prospect
/// text                finalized utterance from the current speaker
/// /switch             toggle the current speaker
/// /partial text       interim result (displayed, never scored)
/// /outage reason      transcription unavailable
/// /restored           transcription back
/// /reset              start a new call
/// /export             print the call summary
/// ```
/// The current speaker lives in the session, so unprefixed text is left unattributed.
/// Returns `None` for blank lines and unknown commands.
pub fn parse_line(line: &str) -> Option<SourceEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(command) = line.strip_prefix('/') {
        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        let rest = rest.trim();
        return match name {
            "switch" => Some(SourceEvent::SwitchSpeaker),
            "partial" => Some(SourceEvent::Spoken { text: rest.to_string(), is_final: false }),
            "outage" => Some(SourceEvent::Unavailable {
                reason: if rest.is_empty() { "transcription unavailable".to_string() } else { rest.to_string() },
            }),
            "restored" => Some(SourceEvent::Restored),
            "reset" => Some(SourceEvent::Reset),
            "export" => Some(SourceEvent::Export),
            _ => None,
        };
    }

    if let Some((prefix, text)) = line.split_once(':') {
        let explicit = match prefix.trim().to_lowercase().as_str() {
            "caller" => Some(Speaker::Caller),
            "prospect" => Some(Speaker::Prospect),
            _ => None,
        };
        if let Some(who) = explicit {
            return Some(SourceEvent::Transcript(TranscriptEvent::finalized(who, text.trim())));
        }
    }

    Some(SourceEvent::Spoken { text: line.to_string(), is_final: true })
}

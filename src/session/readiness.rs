use crate::kernel::category::Category;
use crate::kernel::signal::Signal;

const BASELINE: f64 = 20.0;
const READY_FACTOR: f64 = 0.5;
const OTHER_FACTOR: f64 = 0.2;

/// Rough 0-100 gauge of how open the prospect is, derived from the displayed signals.
/// Readiness signals count more than the rest. Presentation only; never fed back into scoring.
pub fn overall_readiness(signals: &[Signal]) -> u32 {
    let value = signals.iter().fold(BASELINE, |acc, signal| {
        let factor = if signal.category == Category::Ready { READY_FACTOR } else { OTHER_FACTOR };
        (acc + signal.intensity as f64 * factor).min(100.0)
    });
    (value + 0.5).floor() as u32
}

pub fn readiness_label(readiness: u32) -> &'static str {
    match readiness {
        r if r >= 70 => "Open to change",
        r if r >= 40 => "Exploring options",
        _ => "Early conversation",
    }
}

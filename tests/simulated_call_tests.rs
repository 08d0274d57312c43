//! Replays the canned demo conversation through a live session and checks the
//! signal snapshots at fixed turns.

use callpulse::kernel::category::Category;
use callpulse::kernel::config::{EngineConfig, RecommendationMode};
use callpulse::kernel::service::Service;
use callpulse::session::{CallSession, SessionUpdate, Speaker, TranscriptEvent};
use chrono::Utc;

const CONVERSATION: &[(usize, Speaker, &str)] = &[
    (0, Speaker::Caller, "Hi, thanks for reaching out to HB+. How are you doing today?"),
    (1, Speaker::Prospect, "Hi, I'm... honestly, I've been better. Work has been really overwhelming lately."),
    (2, Speaker::Caller, "I hear you. That sounds like a lot to carry. What made you curious about reaching out to us?"),
    (3, Speaker::Prospect, "I used to be so active, you know? But between the long hours and sitting at my desk all day, my back has been killing me. I feel like I've completely let myself go."),
    (4, Speaker::Caller, "That's really common, and it's brave to acknowledge it. When you say your back has been bothering you, is it more of a constant thing or does it come and go?"),
    (5, Speaker::Prospect, "It's pretty constant now. I've tried going to the gym a few times but honestly, I feel so out of place there. Everyone seems to know what they're doing and I just... I don't even know where to start anymore."),
    (6, Speaker::Caller, "I completely understand that feeling. The gym environment can be really intimidating. Tell me, what does feeling good look like for you? Not just physically, but overall."),
    (7, Speaker::Prospect, "I guess... I just want to feel like myself again? I've been stress eating a lot, and my sleep is terrible. I wake up tired, drag myself through the day, come home exhausted but can't sleep. It's this awful cycle."),
];

struct Checkpoint {
    turn: usize,
    signals: &'static [(Category, u32)],
    recommendation: Option<(Service, u32)>,
}

const CHECKPOINTS: &[Checkpoint] = &[
    Checkpoint { turn: 1, signals: &[], recommendation: None },
    Checkpoint {
        turn: 3,
        signals: &[(Category::Pain, 40), (Category::Burnout, 25)],
        recommendation: Some((Service::Restore, 49)),
    },
    Checkpoint {
        turn: 5,
        signals: &[(Category::Pain, 55), (Category::Ready, 30), (Category::Burnout, 25), (Category::Emotional, 25)],
        recommendation: Some((Service::Restore, 60)),
    },
    Checkpoint {
        turn: 7,
        signals: &[
            (Category::Burnout, 85),
            (Category::Ready, 70),
            (Category::Pain, 55),
            (Category::Nutrition, 30),
            (Category::Emotional, 25),
        ],
        recommendation: Some((Service::Restore, 95)),
    },
];

fn replay(session: &mut CallSession) -> Vec<(usize, SessionUpdate)> {
    session.start_call(Utc::now());
    CONVERSATION
        .iter()
        .filter_map(|(turn, speaker, text)| {
            session
                .handle_transcript(TranscriptEvent::finalized(*speaker, *text), Utc::now())
                .map(|update| (*turn, update))
        })
        .collect()
}

#[test]
fn test_demo_conversation_checkpoints() {
    let mut session = CallSession::default();
    let updates = replay(&mut session);
    assert_eq!(updates.len(), CONVERSATION.len());

    for checkpoint in CHECKPOINTS {
        let (_, update) = updates.iter().find(|(turn, _)| *turn == checkpoint.turn).expect("turn replayed");

        let got: Vec<(Category, u32)> = update.signals.iter().map(|s| (s.category, s.intensity)).collect();
        assert_eq!(got, checkpoint.signals.to_vec(), "signals at turn {}", checkpoint.turn);

        let rec = update.recommendation.as_ref().map(|r| (r.service, r.confidence));
        assert_eq!(rec, checkpoint.recommendation, "recommendation at turn {}", checkpoint.turn);
    }
}

#[test]
fn test_demo_conversation_near_misses() {
    let mut session = CallSession::default();
    replay(&mut session);

    // "intimidating" is not the configured keyword "intimidated"
    assert_eq!(session.engine().scores().get(Category::Emotional), 25);
    assert_eq!(session.engine().scores().get(Category::Consistency), 0);
    assert_eq!(session.overall_readiness(), 94);
    assert_eq!(session.readiness_label(), "Open to change");
}

#[test]
fn test_demo_conversation_ranked() {
    let mut session = CallSession::new(EngineConfig { mode: RecommendationMode::Ranked, ..EngineConfig::default() });
    replay(&mut session);

    let ranked: Vec<(Service, u32)> = session.recommendations().iter().map(|r| (r.service, r.confidence)).collect();
    assert_eq!(ranked, vec![
        (Service::Restore, 95),
        (Service::Mental, 88),
        (Service::Nutrition, 81),
        (Service::Vault, 62),
    ]);
}

#[test]
fn test_demo_conversation_descriptions() {
    let mut session = CallSession::default();
    replay(&mut session);

    let description = |category: Category| {
        session
            .signals()
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.description.clone())
            .expect("signal present")
    };

    assert!(description(Category::Burnout).ends_with("(recently mentioned \"exhausted\")"));
    assert!(description(Category::Ready).ends_with("(recently mentioned \"feel like myself\")"));
    assert!(description(Category::Emotional).ends_with("(recently mentioned \"out of place\")"));
    // Last mention of the back is outside the three-utterance window
    assert_eq!(description(Category::Pain), Category::Pain.description());
}

use serde::{Serialize, Deserialize};

use super::category::Category;
use super::service::Service;
use super::state::ScoreState;

/// Coaching text attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rationale {
    pub reason: String,
    pub approach: String,
}

/// Pure: (Service, scores) -> (reason, approach). Only numbers are interpolated.
pub fn render(service: Service, scores: &ScoreState) -> Rationale {
    Rationale {
        reason: reason(service, scores),
        approach: approach(service).to_string(),
    }
}

pub fn reason(service: Service, scores: &ScoreState) -> String {
    let burnout = scores.get(Category::Burnout);
    let pain = scores.get(Category::Pain);
    let emotional = scores.get(Category::Emotional);
    let ready = scores.get(Category::Ready);
    let consistency = scores.get(Category::Consistency);
    let nutrition = scores.get(Category::Nutrition);

    match service {
        Service::Restore => format!(
            "They're experiencing physical discomfort ({pain}%) combined with burnout signs ({burnout}%). \
             Starting with Restore addresses the physical barriers first in a gentle, supportive environment."
        ),
        Service::Mental => format!(
            "The burnout indicators ({burnout}%) and emotional load ({emotional}%) are significant. \
             Mental health support should be the foundation before adding physical demands."
        ),
        Service::Nutrition => format!(
            "Their relationship with food ({nutrition}%) combined with stress patterns ({burnout}%) \
             suggests nutrition coaching would address root causes of their struggles."
        ),
        Service::Vault => format!(
            "Their emotional load around gym environments ({emotional}%) suggests they'd thrive in a private, \
             judgment-free setting. The Vault offers personalized attention without the intimidation."
        ),
        Service::Forge => format!(
            "They show readiness for change ({ready}%) but need support with consistency ({consistency}%). \
             Forge's community accountability could be the missing piece."
        ),
    }
}

pub fn approach(service: Service) -> &'static str {
    match service {
        Service::Restore => {
            "It sounds like your body has been sending you some signals. Before we talk about fitness, \
             I'd love to introduce you to our Restore program. It's specifically for people who need to heal first. \
             No intimidating gym floor, just gentle, guided work to help you feel better. \
             Would that feel like a good starting point?"
        }
        Service::Mental => {
            "Before we talk about anything physical, I want to acknowledge how much you're carrying right now. \
             We have a Mental Health program that creates space just for that: processing the stress, building resilience. \
             Everything else becomes easier when we start there."
        }
        Service::Nutrition => {
            "It sounds like food has become complicated for you, and that's completely understandable given \
             everything else you're carrying. Our nutrition program isn't about diets. It's about healing your \
             relationship with eating. Would you be open to exploring that?"
        }
        Service::Vault => {
            "I'm hearing that the gym environment hasn't felt right for you. We have something called The Vault. \
             It's completely private training, just you and a coach who meets you exactly where you are. \
             No one watching, no pressure. How does that sound?"
        }
        Service::Forge => {
            "You mentioned wanting to make a change, and I love that energy. Our Forge community is designed for \
             people who do better with support: small groups, real connections, shared accountability. \
             It might be exactly what helps you stay consistent this time."
        }
    }
}

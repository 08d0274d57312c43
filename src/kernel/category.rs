use serde::{Serialize, Deserialize};

/// Points added for each matched keyword.
pub const KEYWORD_INCREMENT: u32 = 15;
/// Points added for each matched phrase. Phrases are less ambiguous than single words.
pub const PHRASE_INCREMENT: u32 = 25;

/// The semantic buckets a conversation is scored against.
/// Declaration order is the tie-break priority when two signals share an intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Burnout,
    Pain,
    Emotional,
    Ready,
    Consistency,
    Nutrition,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Burnout,
        Category::Pain,
        Category::Emotional,
        Category::Ready,
        Category::Consistency,
        Category::Nutrition,
    ];

    /// Position in declaration order. Used as the index into score arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Burnout => "burnout",
            Category::Pain => "pain",
            Category::Emotional => "emotional",
            Category::Ready => "ready",
            Category::Consistency => "consistency",
            Category::Nutrition => "nutrition",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Burnout => "Burnout Indicators",
            Category::Pain => "Physical Discomfort",
            Category::Emotional => "Emotional Load",
            Category::Ready => "Readiness for Change",
            Category::Consistency => "Consistency Challenge",
            Category::Nutrition => "Food Relationship",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Burnout => "Showing signs of stress, fatigue, or overwhelm in their daily life",
            Category::Pain => "Experiencing physical pain or discomfort that may be limiting activity",
            Category::Emotional => "Feeling intimidated or anxious about fitness environments",
            Category::Ready => "Expressing motivation and openness to making positive changes",
            Category::Consistency => "Struggling to maintain routines or stay committed",
            Category::Nutrition => "Challenges with eating habits or relationship with food",
        }
    }

    pub fn patterns(self) -> &'static CategoryPatterns {
        &PATTERNS[self.index()]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match strings for one category. Pure data: extend by adding entries.
#[derive(Debug)]
pub struct CategoryPatterns {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub phrases: &'static [&'static str],
}

/// Everything one utterance matched for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    pub keywords: Vec<&'static str>,
    pub phrases: Vec<&'static str>,
}

impl PatternMatch {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.phrases.is_empty()
    }

    pub fn increment(&self) -> u32 {
        self.keywords.len() as u32 * KEYWORD_INCREMENT + self.phrases.len() as u32 * PHRASE_INCREMENT
    }
}

impl CategoryPatterns {
    /// Substring match against already lower-cased text.
    /// Every distinct entry that occurs counts once; there is no early exit.
    pub fn matches(&self, normalized: &str) -> PatternMatch {
        PatternMatch {
            keywords: self.keywords.iter().copied().filter(|k| normalized.contains(k)).collect(),
            phrases: self.phrases.iter().copied().filter(|p| normalized.contains(p)).collect(),
        }
    }

    /// Most specific pattern present in the text, phrases first.
    pub fn first_hit(&self, normalized: &str) -> Option<&'static str> {
        self.phrases
            .iter()
            .chain(self.keywords.iter())
            .copied()
            .find(|p| normalized.contains(p))
    }
}

// Entries are lower case; matching runs on lower-cased utterances.
// Table order must follow `Category` declaration order.
pub static PATTERNS: [CategoryPatterns; 6] = [
    CategoryPatterns {
        category: Category::Burnout,
        keywords: &[
            "stressed", "exhausted", "tired", "overwhelmed", "burnout", "drained", "fatigue",
            "sleep", "insomnia", "can't sleep", "no energy",
        ],
        phrases: &[
            "too much work", "long hours", "no time", "can't keep up", "falling apart",
            "running on empty", "at my limit",
        ],
    },
    CategoryPatterns {
        category: Category::Pain,
        keywords: &[
            "pain", "hurt", "ache", "sore", "injury", "back", "shoulder", "knee", "neck", "stiff",
            "tight", "chronic",
        ],
        phrases: &[
            "killing me", "can't move", "limited mobility", "old injury", "flares up",
            "constant pain",
        ],
    },
    CategoryPatterns {
        category: Category::Emotional,
        keywords: &[
            "anxious", "scared", "intimidated", "afraid", "nervous", "worried", "self-conscious",
            "judged", "embarrassed",
        ],
        phrases: &[
            "don't belong", "out of place", "everyone stares", "don't fit in", "too intimidated",
            "feel stupid", "don't know what i'm doing",
        ],
    },
    CategoryPatterns {
        category: Category::Ready,
        keywords: &[
            "ready", "change", "want", "need", "help", "better", "improve", "start", "commit",
            "determined", "motivated",
        ],
        phrases: &[
            "feel like myself", "get back to", "make a change", "tired of feeling", "want to try",
            "open to", "willing to",
        ],
    },
    CategoryPatterns {
        category: Category::Consistency,
        keywords: &[
            "inconsistent", "stop", "quit", "give up", "motivation", "discipline", "routine",
            "habit", "struggle",
        ],
        phrases: &[
            "can't stick", "keep falling off", "start and stop", "lose motivation",
            "hard to maintain",
        ],
    },
    CategoryPatterns {
        category: Category::Nutrition,
        keywords: &[
            "eating", "food", "diet", "weight", "binge", "stress eating", "unhealthy", "junk",
            "cravings",
        ],
        phrases: &[
            "relationship with food", "can't stop eating", "emotional eating",
            "don't know what to eat", "gaining weight",
        ],
    },
];

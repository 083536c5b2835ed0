//! Intent classification using regex patterns and keyword lists.
//!
//! Pattern-based purpose detection for Chinese (and some English) chat
//! messages, adjusted by the emotion already detected in the same message.
//! No ML model required - pure Rust regex matching.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::contains_keyword;
use super::emotion::{Emotion, EmotionalState};

/// Conversational purpose of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    SeekingAdvice,
    EmotionalSupport,
    CasualChat,
    SpiritualGuidance,
    ProblemSolving,
    SharingJoy,
    SeekingValidation,
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl IntentCategory {
    /// Returns the wire label for the category
    pub fn label(&self) -> &'static str {
        match self {
            IntentCategory::SeekingAdvice => "seeking_advice",
            IntentCategory::EmotionalSupport => "emotional_support",
            IntentCategory::CasualChat => "casual_chat",
            IntentCategory::SpiritualGuidance => "spiritual_guidance",
            IntentCategory::ProblemSolving => "problem_solving",
            IntentCategory::SharingJoy => "sharing_joy",
            IntentCategory::SeekingValidation => "seeking_validation",
        }
    }
}

/// How quickly the message should be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Kind of reply the user most likely expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Empathetic,
    Analytical,
    Encouraging,
    Practical,
    Spiritual,
}

/// Classified purpose of a message. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIntent {
    /// Winning category
    pub category: IntentCategory,
    /// Finer label within the category
    pub sub_category: String,
    /// Escalated urgency
    pub urgency: Urgency,
    /// Reply style the user expects
    pub expected_response_type: ResponseType,
}

impl Default for MessageIntent {
    fn default() -> Self {
        Self {
            category: IntentCategory::CasualChat,
            sub_category: subcategory_table(IntentCategory::CasualChat)[0]
                .label
                .to_string(),
            urgency: Urgency::Low,
            expected_response_type: ResponseType::Empathetic,
        }
    }
}

/// Pattern definition for intent matching
struct IntentPattern {
    category: IntentCategory,
    patterns: Vec<Regex>,
    keywords: &'static [&'static str],
}

struct SubCategory {
    label: &'static str,
    keywords: &'static [&'static str],
}

const PATTERN_SCORE: f32 = 3.0;
const KEYWORD_SCORE: f32 = 1.0;
/// Bonus given to the comfort or celebration category by the message's emotion.
const EMOTION_BONUS: f32 = 3.0;
const ESCALATE_TO_HIGH: f32 = 80.0;
const ESCALATE_TO_MEDIUM: f32 = 50.0;

// Compile patterns once at startup
// NOTE: expect() is acceptable here, the patterns are compile-time constants.
static ADVICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(怎么办|该怎么|怎么做|如何)").expect("Invalid regex: advice how-to"),
        Regex::new(r"(应该|该不该|要不要)").expect("Invalid regex: advice should"),
        Regex::new(r"(建议|意见)").expect("Invalid regex: advice request"),
        Regex::new(r"(?i)\b(should i|what should|any advice)\b").expect("Invalid regex: English advice"),
    ]
});

static SUPPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"我(最近|好|很|真的|有点)?.{0,4}(难过|伤心|难受|痛苦|累|孤独)")
            .expect("Invalid regex: support feeling"),
        Regex::new(r"(安慰|陪陪我|陪我|抱抱)").expect("Invalid regex: support comfort"),
        Regex::new(r"(?i)\b(i feel|i'm so|comfort me)\b").expect("Invalid regex: English support"),
    ]
});

static CASUAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"^(你好|您好|嗨|哈喽|早上好|晚上好|在吗)").expect("Invalid regex: casual greeting"),
        Regex::new(r"(?i)^(hi|hello|hey)\b").expect("Invalid regex: English greeting"),
        Regex::new(r"(聊聊|聊天|无聊)").expect("Invalid regex: casual chat"),
    ]
});

static SPIRITUAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(运势|命运|星座|缘分|前世|因果)").expect("Invalid regex: spiritual topics"),
        Regex::new(r"(求签|占卜|指点|开示|算一算|算算)").expect("Invalid regex: spiritual practice"),
        Regex::new(r"(?i)\b(fortune|destiny|horoscope|karma)\b").expect("Invalid regex: English spiritual"),
    ]
});

static PROBLEM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(解决|处理|搞定)").expect("Invalid regex: problem verbs"),
        Regex::new(r"(问题|麻烦|困难)").expect("Invalid regex: problem nouns"),
        Regex::new(r"(?i)\b(fix|solve|problem)\b").expect("Invalid regex: English problem"),
    ]
});

static JOY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(告诉你|分享|好消息)").expect("Invalid regex: joy sharing"),
        Regex::new(r"(成功了|通过了|拿到了|考上了|升职了)").expect("Invalid regex: joy achievement"),
        Regex::new(r"(?i)\b(good news|guess what|i did it)\b").expect("Invalid regex: English joy"),
    ]
});

static VALIDATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(我是不是|我这样对吗|我做得对|对不对)").expect("Invalid regex: validation self-check"),
        Regex::new(r"(你觉得我|你会不会觉得)").expect("Invalid regex: validation opinion"),
        Regex::new(r"(?i)\b(am i|was i right|do you think i)\b").expect("Invalid regex: English validation"),
    ]
});

static HIGH_URGENCY: &[&str] = &["救命", "紧急", "马上", "立刻", "撑不下去", "活不下去", "急死", "urgent", "emergency"];
static MEDIUM_URGENCY: &[&str] = &["尽快", "怎么办", "很担心", "着急", "烦死", "asap", "soon"];

fn subcategory_table(category: IntentCategory) -> &'static [SubCategory] {
    match category {
        IntentCategory::SeekingAdvice => &[
            SubCategory { label: "general_guidance", keywords: &[] },
            SubCategory { label: "career_choice", keywords: &["工作", "事业", "跳槽", "面试"] },
            SubCategory { label: "relationship_choice", keywords: &["感情", "恋爱", "分手", "对象"] },
            SubCategory { label: "financial_decision", keywords: &["钱", "投资", "理财", "财运"] },
        ],
        IntentCategory::EmotionalSupport => &[
            SubCategory { label: "general_comfort", keywords: &[] },
            SubCategory { label: "stress_relief", keywords: &["压力", "累", "加班", "忙"] },
            SubCategory { label: "loneliness", keywords: &["孤独", "寂寞", "一个人"] },
            SubCategory { label: "heartbreak", keywords: &["分手", "失恋", "心碎"] },
            SubCategory { label: "grief", keywords: &["去世", "失去", "离开了"] },
        ],
        IntentCategory::CasualChat => &[
            SubCategory { label: "small_talk", keywords: &[] },
            SubCategory { label: "greeting", keywords: &["你好", "您好", "嗨", "早上好", "晚上好", "hello"] },
            SubCategory { label: "daily_life", keywords: &["吃饭", "天气", "周末"] },
        ],
        IntentCategory::SpiritualGuidance => &[
            SubCategory { label: "fortune_reading", keywords: &["运势", "星座", "运气"] },
            SubCategory { label: "fate_and_karma", keywords: &["命运", "因果", "前世", "缘分"] },
            SubCategory { label: "blessing_request", keywords: &["保佑", "祈福", "手链"] },
        ],
        IntentCategory::ProblemSolving => &[
            SubCategory { label: "general_problem", keywords: &[] },
            SubCategory { label: "work_problem", keywords: &["工作", "老板", "同事", "项目"] },
            SubCategory { label: "interpersonal_problem", keywords: &["朋友", "家人", "吵架"] },
        ],
        IntentCategory::SharingJoy => &[
            SubCategory { label: "good_news", keywords: &[] },
            SubCategory { label: "achievement", keywords: &["成功", "通过", "考上", "升职", "拿到"] },
            SubCategory { label: "romance", keywords: &["表白", "在一起", "结婚"] },
        ],
        IntentCategory::SeekingValidation => &[
            SubCategory { label: "self_doubt", keywords: &[] },
            SubCategory { label: "decision_check", keywords: &["决定", "选择", "做得对"] },
        ],
    }
}

/// Intent analyzer using regex patterns and keyword lists
pub struct IntentAnalyzer {
    patterns: Vec<IntentPattern>,
}

impl Default for IntentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentAnalyzer {
    /// Create a new intent analyzer with all patterns.
    ///
    /// The order of the groups is the tie-break order: on equal scores the
    /// earlier category wins.
    pub fn new() -> Self {
        let patterns = vec![
            IntentPattern {
                category: IntentCategory::SeekingAdvice,
                patterns: ADVICE_PATTERNS.clone(),
                keywords: &["建议", "选择", "决定", "advice"],
            },
            IntentPattern {
                category: IntentCategory::EmotionalSupport,
                patterns: SUPPORT_PATTERNS.clone(),
                keywords: &["难过", "伤心", "压力", "孤独", "累", "委屈", "心情", "lonely"],
            },
            IntentPattern {
                category: IntentCategory::ProblemSolving,
                patterns: PROBLEM_PATTERNS.clone(),
                keywords: &["方法", "办法", "步骤"],
            },
            IntentPattern {
                category: IntentCategory::SpiritualGuidance,
                patterns: SPIRITUAL_PATTERNS.clone(),
                keywords: &["运气", "手链", "佛", "祈福", "保佑", "冥冥"],
            },
            IntentPattern {
                category: IntentCategory::SharingJoy,
                patterns: JOY_PATTERNS.clone(),
                keywords: &["开心", "高兴", "终于", "太好了", "happy"],
            },
            IntentPattern {
                category: IntentCategory::SeekingValidation,
                patterns: VALIDATION_PATTERNS.clone(),
                keywords: &["认可", "肯定", "对吗"],
            },
            IntentPattern {
                category: IntentCategory::CasualChat,
                patterns: CASUAL_PATTERNS.clone(),
                keywords: &["哈哈", "天气", "吃饭"],
            },
        ];

        Self { patterns }
    }

    /// Classify the purpose of a text, given the emotion of the same text
    pub fn analyze(&self, text: &str, emotion: &EmotionalState) -> MessageIntent {
        let text = text.trim().to_lowercase();

        let category = if text.is_empty() {
            IntentCategory::CasualChat
        } else {
            self.best_category(&text, emotion)
        };

        MessageIntent {
            category,
            sub_category: self.sub_category(&text, category).to_string(),
            urgency: self.urgency(&text, emotion),
            expected_response_type: self.response_type(category, emotion),
        }
    }

    fn best_category(&self, text: &str, emotion: &EmotionalState) -> IntentCategory {
        let mut best = IntentCategory::CasualChat;
        let mut best_score: f32 = 0.0;

        for group in &self.patterns {
            let pattern_hits = group.patterns.iter().filter(|p| p.is_match(text)).count() as f32;
            let keyword_hits = group.keywords.iter().filter(|k| contains_keyword(text, k)).count() as f32;
            let mut score = pattern_hits * PATTERN_SCORE + keyword_hits * KEYWORD_SCORE;

            score += match (group.category, emotion.primary) {
                (IntentCategory::EmotionalSupport, Emotion::Sadness | Emotion::Fear) => EMOTION_BONUS,
                (IntentCategory::SharingJoy, Emotion::Joy) => EMOTION_BONUS,
                _ => 0.0,
            };

            // Strictly greater: first maximum wins
            if score > best_score {
                best_score = score;
                best = group.category;
            }
        }

        best
    }

    fn sub_category(&self, text: &str, category: IntentCategory) -> &'static str {
        let table = subcategory_table(category);
        table
            .iter()
            .find(|sub| sub.keywords.iter().any(|k| contains_keyword(text, k)))
            .or_else(|| table.first())
            .map(|sub| sub.label)
            .unwrap_or("general")
    }

    /// Keyword tier lookup, then escalation by emotional intensity.
    /// Escalation never lowers the tier found by keywords.
    fn urgency(&self, text: &str, emotion: &EmotionalState) -> Urgency {
        let contains_any = |words: &[&str]| words.iter().any(|w| contains_keyword(text, w));

        // Highest tier wins; anything without an urgency phrase is low
        let mut urgency = if contains_any(HIGH_URGENCY) {
            Urgency::High
        } else if contains_any(MEDIUM_URGENCY) {
            Urgency::Medium
        } else {
            Urgency::Low
        };

        if emotion.intensity > ESCALATE_TO_HIGH {
            urgency = Urgency::High;
        } else if emotion.intensity > ESCALATE_TO_MEDIUM {
            urgency = urgency.max(Urgency::Medium);
        }

        urgency
    }

    fn response_type(&self, category: IntentCategory, emotion: &EmotionalState) -> ResponseType {
        if emotion.primary.needs_comfort() {
            return ResponseType::Empathetic;
        }

        match category {
            IntentCategory::SeekingAdvice | IntentCategory::ProblemSolving => ResponseType::Practical,
            IntentCategory::EmotionalSupport => ResponseType::Empathetic,
            IntentCategory::SpiritualGuidance => ResponseType::Spiritual,
            IntentCategory::SharingJoy => ResponseType::Encouraging,
            IntentCategory::CasualChat | IntentCategory::SeekingValidation => ResponseType::Empathetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::emotion::EmotionalAnalyzer;

    fn classify(text: &str) -> MessageIntent {
        let emotion = EmotionalAnalyzer::new().analyze(text);
        IntentAnalyzer::new().analyze(text, &emotion)
    }

    #[test]
    fn test_emotional_support_detection() {
        let intent = classify("我最近很难过，工作压力很大");
        assert!(matches!(
            intent.category,
            IntentCategory::EmotionalSupport | IntentCategory::SeekingAdvice
        ));
        assert_eq!(intent.expected_response_type, ResponseType::Empathetic);
        assert_eq!(intent.sub_category, "stress_relief");
    }

    #[test]
    fn test_advice_detection() {
        let intent = classify("要不要跳槽？给我点建议");
        assert_eq!(intent.category, IntentCategory::SeekingAdvice);
        assert_eq!(intent.sub_category, "career_choice");
        assert_eq!(intent.expected_response_type, ResponseType::Practical);
    }

    #[test]
    fn test_spiritual_detection() {
        let intent = classify("帮我看看这个月的运势");
        assert_eq!(intent.category, IntentCategory::SpiritualGuidance);
        assert_eq!(intent.sub_category, "fortune_reading");
        assert_eq!(intent.expected_response_type, ResponseType::Spiritual);
    }

    #[test]
    fn test_sharing_joy_detection() {
        let intent = classify("告诉你一个好消息，我考上了！太开心了");
        assert_eq!(intent.category, IntentCategory::SharingJoy);
        assert_eq!(intent.sub_category, "achievement");
        assert_eq!(intent.expected_response_type, ResponseType::Encouraging);
    }

    #[test]
    fn test_casual_default() {
        let intent = classify("");
        assert_eq!(intent, MessageIntent::default());

        let intent = classify("嗯");
        assert_eq!(intent.category, IntentCategory::CasualChat);
        assert_eq!(intent.urgency, Urgency::Low);
    }

    #[test]
    fn test_urgency_keywords() {
        let intent = classify("救命，快帮帮我");
        assert_eq!(intent.urgency, Urgency::High);

        let intent = classify("这件事该怎么办");
        assert_eq!(intent.urgency, Urgency::Medium);

        let intent = classify("有空再说吧");
        assert_eq!(intent.urgency, Urgency::Low);
    }

    #[test]
    fn test_urgency_tiers_checked_highest_first() {
        let intent = classify("不急，慢慢说怎么办");
        assert_eq!(intent.urgency, Urgency::Medium);

        let intent = classify("不急，但是救命");
        assert_eq!(intent.urgency, Urgency::High);
    }

    #[test]
    fn test_urgency_escalation_only() {
        let analyzer = IntentAnalyzer::new();
        let intense = EmotionalState {
            primary: Emotion::Anger,
            intensity: 85.0,
            ..EmotionalState::neutral()
        };
        let intent = analyzer.analyze("不急，有空再说", &intense);
        assert_eq!(intent.urgency, Urgency::High);

        let moderate = EmotionalState {
            intensity: 60.0,
            ..EmotionalState::neutral()
        };
        let intent = analyzer.analyze("不急，有空再说", &moderate);
        assert_eq!(intent.urgency, Urgency::Medium);

        // Keyword urgency is never lowered by a calm emotion
        let intent = analyzer.analyze("救命", &EmotionalState::neutral());
        assert_eq!(intent.urgency, Urgency::High);
    }

    #[test]
    fn test_fear_forces_empathetic() {
        let analyzer = IntentAnalyzer::new();
        let fear = EmotionalState {
            primary: Emotion::Fear,
            intensity: 40.0,
            ..EmotionalState::neutral()
        };
        let intent = analyzer.analyze("要不要跳槽", &fear);
        assert_eq!(intent.expected_response_type, ResponseType::Empathetic);
    }
}

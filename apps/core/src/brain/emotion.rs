//! Emotion classification using a fixed keyword lexicon.
//!
//! Scores text against per-emotion keyword lists (primary, secondary and
//! three intensity tiers) and extracts short causal "trigger" phrases.
//! Deterministic, no model required.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::keyword_matches;

/// Closed set of emotions the lexicon can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Trust,
    Anticipation,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Emotion {
    /// Returns the wire label for the emotion
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Disgust => "disgust",
            Emotion::Trust => "trust",
            Emotion::Anticipation => "anticipation",
        }
    }

    /// Sadness, fear and anger raise message significance.
    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Sadness | Emotion::Fear | Emotion::Anger)
    }

    /// Sadness and fear call for comfort regardless of what was asked.
    pub fn needs_comfort(&self) -> bool {
        matches!(self, Emotion::Sadness | Emotion::Fear)
    }

    fn valence_sign(&self) -> f32 {
        match self {
            Emotion::Joy | Emotion::Trust | Emotion::Anticipation | Emotion::Surprise => 1.0,
            Emotion::Sadness | Emotion::Anger | Emotion::Fear | Emotion::Disgust => -1.0,
        }
    }
}

/// Direction of the emotional trajectory across a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

/// Minimum valence swing before a trend is reported as rising or declining.
const TREND_THRESHOLD: f32 = 15.0;
/// How many past journey entries the trend is measured against.
const TREND_WINDOW: usize = 3;

impl Trend {
    /// Compares `current` against the mean signed valence of the last few
    /// journey entries. An empty journey is always `Stable`.
    pub fn from_journey<'a, I>(journey: I, current: &EmotionalState) -> Trend
    where
        I: IntoIterator<Item = &'a EmotionalState>,
        I::IntoIter: DoubleEndedIterator,
    {
        let recent: Vec<f32> = journey
            .into_iter()
            .rev()
            .take(TREND_WINDOW)
            .map(EmotionalState::signed_valence)
            .collect();

        if recent.is_empty() {
            return Trend::Stable;
        }

        let baseline = recent.iter().sum::<f32>() / recent.len() as f32;
        let delta = current.signed_valence() - baseline;

        if delta > TREND_THRESHOLD {
            Trend::Rising
        } else if delta < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// Emotional classification of a single message. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// Top-scoring emotion
    pub primary: Emotion,
    /// Up to two runner-up emotions, best first
    pub secondary: Vec<Emotion>,
    /// Strength of the primary emotion (0 - 100)
    pub intensity: f32,
    /// Inverse of emotional keyword density (0 - 100)
    pub stability: f32,
    /// Trajectory relative to the session's journey
    pub trend: Trend,
    /// Short causal phrases ("because ...")
    pub triggers: Vec<String>,
}

/// Intensity reported when no lexicon keyword matched.
pub const NEUTRAL_INTENSITY: f32 = 30.0;

impl Default for EmotionalState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EmotionalState {
    /// The state produced for text without any emotional keyword.
    pub fn neutral() -> Self {
        Self {
            primary: Emotion::Trust,
            secondary: vec![],
            intensity: NEUTRAL_INTENSITY,
            stability: 100.0,
            trend: Trend::Stable,
            triggers: vec![],
        }
    }

    /// Intensity signed by whether the primary emotion is pleasant.
    pub fn signed_valence(&self) -> f32 {
        self.primary.valence_sign() * self.intensity
    }

    /// Returns a copy carrying the given trend.
    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }
}

/// Keyword lists for one emotion
struct EmotionLexicon {
    emotion: Emotion,
    primary: &'static [&'static str],
    secondary: &'static [&'static str],
    high: &'static [&'static str],
    medium: &'static [&'static str],
    low: &'static [&'static str],
}

// Order matters: equal scores resolve to the earlier entry.
static LEXICON: &[EmotionLexicon] = &[
    EmotionLexicon {
        emotion: Emotion::Joy,
        primary: &["开心", "高兴", "快乐", "幸福", "happy", "joy"],
        secondary: &["不错", "顺利", "满意", "喜欢", "好运", "glad"],
        high: &["太开心了", "欣喜若狂", "超级开心", "ecstatic"],
        medium: &["很开心", "很高兴", "好开心", "excited"],
        low: &["还不错", "挺好", "有点开心"],
    },
    EmotionLexicon {
        emotion: Emotion::Sadness,
        primary: &["难过", "伤心", "悲伤", "痛苦", "sad"],
        secondary: &["失落", "孤独", "寂寞", "沮丧", "失望", "不开心", "哭", "lonely", "hopeless"],
        high: &["绝望", "崩溃", "痛不欲生", "心碎", "heartbroken"],
        medium: &["很难过", "很伤心", "好难过", "太难受"],
        low: &["有点难过", "有点失落", "有些低落"],
    },
    EmotionLexicon {
        emotion: Emotion::Anger,
        primary: &["生气", "愤怒", "气死", "angry"],
        secondary: &["烦", "讨厌", "不公平", "受不了", "annoyed"],
        high: &["气炸了", "忍无可忍", "暴怒", "furious"],
        medium: &["很生气", "太气人"],
        low: &["有点生气", "有点烦"],
    },
    EmotionLexicon {
        emotion: Emotion::Fear,
        primary: &["害怕", "担心", "焦虑", "恐惧", "afraid", "worried"],
        secondary: &["压力", "不安", "紧张", "慌", "迷茫", "anxious"],
        high: &["吓死", "恐慌", "崩溃边缘", "terrified"],
        medium: &["很担心", "很焦虑", "很害怕"],
        low: &["有点担心", "有点紧张", "有点怕"],
    },
    EmotionLexicon {
        emotion: Emotion::Surprise,
        primary: &["惊讶", "震惊", "没想到", "surprised"],
        secondary: &["居然", "竟然", "意外", "wow"],
        high: &["太震惊了", "难以置信", "unbelievable"],
        medium: &["好意外", "真没想到"],
        low: &["有点意外"],
    },
    EmotionLexicon {
        emotion: Emotion::Disgust,
        primary: &["恶心", "厌恶", "disgusting"],
        secondary: &["反感", "嫌弃", "看不惯"],
        high: &["恶心死了", "令人作呕"],
        medium: &["很反感", "很恶心"],
        low: &["有点反感"],
    },
    EmotionLexicon {
        emotion: Emotion::Trust,
        primary: &["相信", "信任", "依靠", "trust"],
        secondary: &["放心", "安心", "感谢", "谢谢", "thanks"],
        high: &["完全相信", "深信不疑"],
        medium: &["很信任", "很放心"],
        low: &["还算放心"],
    },
    EmotionLexicon {
        emotion: Emotion::Anticipation,
        primary: &["期待", "希望", "盼望", "hope", "looking forward"],
        secondary: &["计划", "打算", "明天", "未来", "想要"],
        high: &["迫不及待", "万分期待"],
        medium: &["很期待", "好期待"],
        low: &["有点期待"],
    },
];

const PRIMARY_SCORE: f32 = 3.0;
const PRIMARY_INTENSITY: f32 = 20.0;
const SECONDARY_SCORE: f32 = 1.0;
const SECONDARY_INTENSITY: f32 = 10.0;
/// Base unit multiplied by the tier factor (high 3, medium 2, low 1).
const TIER_UNIT: f32 = 10.0;
const MAX_TRIGGERS: usize = 3;

// NOTE: expect() is acceptable here, the patterns are compile-time constants.
static TRIGGER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"因为(?P<cause>[^，。！？,.!?\n]{1,20})").expect("Invalid regex: 因为 trigger"),
        Regex::new(r"(?:每当|当)(?P<cause>[^，。！？,.!?\n]{1,20}?)(?:的时候|时)")
            .expect("Invalid regex: 当…时 trigger"),
        Regex::new(r"(?P<cause>[^，。！？,.!?\n]{1,20})(?:让我|使我|令我)")
            .expect("Invalid regex: 让我 trigger"),
        Regex::new(r"(?i)\bbecause(?: of)? (?P<cause>[^,.!?\n]{1,20})")
            .expect("Invalid regex: because trigger"),
        Regex::new(r"(?i)\bwhen (?P<cause>[^,.!?\n]{1,20})").expect("Invalid regex: when trigger"),
        Regex::new(r"(?i)(?P<cause>[^,.!?\n]{1,20}) makes me\b")
            .expect("Invalid regex: makes me trigger"),
    ]
});

/// Returns true if `keyword` occurs at least once without a negation
/// immediately in front of it ("不开心" does not count as "开心").
fn contains_affirmed(text: &str, keyword: &str) -> bool {
    keyword_matches(text, keyword).any(|idx| {
        let before = &text[..idx];
        let negated_zh = matches!(before.chars().next_back(), Some('不') | Some('没'));
        let negated_en = before.ends_with("not ") || before.ends_with("n't ");
        !(negated_zh || negated_en)
    })
}

#[derive(Debug, Clone, Copy)]
struct EmotionScore {
    emotion: Emotion,
    score: f32,
    intensity: f32,
}

/// Lexicon-based emotion analyzer
pub struct EmotionalAnalyzer {
    lexicon: &'static [EmotionLexicon],
}

impl Default for EmotionalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionalAnalyzer {
    /// Create an analyzer over the built-in lexicon
    pub fn new() -> Self {
        Self { lexicon: LEXICON }
    }

    fn score_entry(&self, text: &str, entry: &EmotionLexicon) -> EmotionScore {
        let mut score = 0.0;
        let mut intensity: f32 = 0.0;

        let hits = |words: &[&str]| words.iter().filter(|w| contains_affirmed(text, w)).count() as f32;

        let primary = hits(entry.primary);
        score += primary * PRIMARY_SCORE;
        intensity += primary * PRIMARY_INTENSITY;

        let secondary = hits(entry.secondary);
        score += secondary * SECONDARY_SCORE;
        intensity += secondary * SECONDARY_INTENSITY;

        for (words, factor) in [(entry.high, 3.0), (entry.medium, 2.0), (entry.low, 1.0)] {
            let tier = hits(words);
            score += tier * factor;
            intensity += tier * factor * TIER_UNIT;
        }

        EmotionScore {
            emotion: entry.emotion,
            score,
            intensity: intensity.min(100.0),
        }
    }

    /// Analyze the emotional tone of a text.
    ///
    /// The returned trend is always `Stable`; the session-aware trend is
    /// applied by the caller, which holds the emotional journey.
    pub fn analyze(&self, text: &str) -> EmotionalState {
        let text = text.trim().to_lowercase();

        if text.is_empty() {
            return EmotionalState::neutral();
        }

        let mut scores: Vec<EmotionScore> = self
            .lexicon
            .iter()
            .map(|entry| self.score_entry(&text, entry))
            .collect();

        let total_score: f32 = scores.iter().map(|s| s.score).sum();
        let char_len = text.chars().count() as f32;
        let stability = (100.0 - total_score / char_len * 1000.0).clamp(0.0, 100.0);
        let triggers = self.extract_triggers(&text);

        // Stable sort: ties keep lexicon order
        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let top = scores[0];
        if top.score <= 0.0 {
            return EmotionalState {
                triggers,
                ..EmotionalState::neutral()
            };
        }

        let secondary = scores
            .iter()
            .skip(1)
            .filter(|s| s.score > 0.0)
            .take(2)
            .map(|s| s.emotion)
            .collect();

        EmotionalState {
            primary: top.emotion,
            secondary,
            intensity: top.intensity.clamp(0.0, 100.0),
            stability,
            trend: Trend::Stable,
            triggers,
        }
    }

    /// Extract up to three distinct causal phrases
    fn extract_triggers(&self, text: &str) -> Vec<String> {
        let mut triggers: Vec<String> = Vec::new();

        for pattern in TRIGGER_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                if let Some(cause) = caps.name("cause") {
                    let cause = cause.as_str().trim();
                    if !cause.is_empty() && !triggers.iter().any(|t| t == cause) {
                        triggers.push(cause.to_string());
                    }
                }
                if triggers.len() >= MAX_TRIGGERS {
                    return triggers;
                }
            }
        }

        triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sadness_detection() {
        let analyzer = EmotionalAnalyzer::new();

        let state = analyzer.analyze("我最近很难过，工作压力很大");
        assert_eq!(state.primary, Emotion::Sadness);
        assert!(state.intensity > 0.0);
        assert!(state.secondary.contains(&Emotion::Fear));
    }

    #[test]
    fn test_neutral_default() {
        let analyzer = EmotionalAnalyzer::new();

        let state = analyzer.analyze("今天星期三");
        assert_eq!(state.primary, Emotion::Trust);
        assert_eq!(state.intensity, 30.0);
        assert_eq!(state.stability, 100.0);
        assert!(state.secondary.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let analyzer = EmotionalAnalyzer::new();

        for text in ["", "   "] {
            let state = analyzer.analyze(text);
            assert_eq!(state, EmotionalState::neutral());
        }
    }

    #[test]
    fn test_english_keywords_need_whole_words() {
        let analyzer = EmotionalAnalyzer::new();

        let state = analyzer.analyze("I feel hopeless and I can't enjoy anything");
        assert_eq!(state.primary, Emotion::Sadness);
        assert!(!state.secondary.contains(&Emotion::Joy));
        assert!(!state.secondary.contains(&Emotion::Anticipation));
    }

    #[test]
    fn test_negation_is_not_joy() {
        let analyzer = EmotionalAnalyzer::new();

        let state = analyzer.analyze("我今天不开心");
        assert_eq!(state.primary, Emotion::Sadness);
    }

    #[test]
    fn test_intensity_tiers_raise_intensity() {
        let analyzer = EmotionalAnalyzer::new();

        let mild = analyzer.analyze("有点难过");
        let strong = analyzer.analyze("我真的很绝望，彻底崩溃了，心碎");
        assert_eq!(strong.primary, Emotion::Sadness);
        assert!(strong.intensity > mild.intensity);
        assert!(strong.intensity <= 100.0);
    }

    #[test]
    fn test_triggers_extracted() {
        let analyzer = EmotionalAnalyzer::new();

        let state = analyzer.analyze("我很难过，因为考试没考好");
        assert_eq!(state.triggers, vec!["考试没考好".to_string()]);

        let state = analyzer.analyze("I am sad because my cat ran away");
        assert_eq!(state.triggers, vec!["my cat ran away".to_string()]);
    }

    #[test]
    fn test_triggers_capped() {
        let analyzer = EmotionalAnalyzer::new();

        let state = analyzer.analyze("因为甲，因为乙，因为丙，因为丁");
        assert_eq!(state.triggers.len(), 3);
    }

    #[test]
    fn test_trend_from_journey() {
        let sad = EmotionalState {
            primary: Emotion::Sadness,
            intensity: 60.0,
            ..EmotionalState::neutral()
        };
        let happy = EmotionalState {
            primary: Emotion::Joy,
            intensity: 60.0,
            ..EmotionalState::neutral()
        };

        let journey = vec![sad.clone(), sad.clone()];
        assert_eq!(Trend::from_journey(&journey, &happy), Trend::Rising);

        let journey = vec![happy.clone()];
        assert_eq!(Trend::from_journey(&journey, &sad), Trend::Declining);

        let empty: Vec<EmotionalState> = vec![];
        assert_eq!(Trend::from_journey(&empty, &sad), Trend::Stable);
    }
}

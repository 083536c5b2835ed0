//! Message Analyzer - Main orchestrator for the Brain module.
//!
//! Coordinates emotion analysis, intent classification and topic
//! extraction, then derives the session-aware trend and the message's
//! significance.

use std::time::Instant;
use tracing::debug;

use super::emotion::{EmotionalAnalyzer, EmotionalState, Trend};
use super::intent::{IntentAnalyzer, MessageIntent, Urgency};
use super::message::{ConversationMessage, Role};
use super::topics::TopicExtractor;

const BASE_SIGNIFICANCE: f32 = 50.0;
const INTENSITY_WEIGHT: f32 = 0.3;
const NEGATIVE_EMOTION_BONUS: f32 = 20.0;

/// Importance of a message for long-term memory, clamped to 0 - 100.
pub fn significance(emotion: &EmotionalState, intent: &MessageIntent) -> f32 {
    let urgency_bonus = match intent.urgency {
        Urgency::High => 30.0,
        Urgency::Medium => 15.0,
        Urgency::Low => 0.0,
    };
    let negative_bonus = if emotion.primary.is_negative() {
        NEGATIVE_EMOTION_BONUS
    } else {
        0.0
    };

    (BASE_SIGNIFICANCE + emotion.intensity * INTENSITY_WEIGHT + urgency_bonus + negative_bonus)
        .clamp(0.0, 100.0)
}

/// Main analyzer that turns raw user text into a `ConversationMessage`
pub struct MessageAnalyzer {
    emotional_analyzer: EmotionalAnalyzer,
    intent_analyzer: IntentAnalyzer,
    topic_extractor: TopicExtractor,
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageAnalyzer {
    /// Create a new analyzer with default settings
    pub fn new() -> Self {
        Self {
            emotional_analyzer: EmotionalAnalyzer::new(),
            intent_analyzer: IntentAnalyzer::new(),
            topic_extractor: TopicExtractor::new(),
        }
    }

    /// Analyze a user message addressed to `persona_id`.
    ///
    /// `journey` is the session's emotional history (oldest first); it is
    /// only read to derive the trend of the new message.
    pub fn analyze<'a, I>(&self, text: &str, persona_id: &str, journey: I) -> ConversationMessage
    where
        I: IntoIterator<Item = &'a EmotionalState>,
        I::IntoIter: DoubleEndedIterator,
    {
        let start = Instant::now();

        let emotion = self.emotional_analyzer.analyze(text);
        let trend = Trend::from_journey(journey, &emotion);
        let emotion = emotion.with_trend(trend);

        let intent = self.intent_analyzer.analyze(text, &emotion);
        let topics = self.topic_extractor.extract(text);
        let significance = significance(&emotion, &intent);

        let message = ConversationMessage::new(
            Role::User,
            text.to_string(),
            persona_id.to_string(),
            emotion,
            intent,
            topics,
            significance,
        );

        debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            "Analyzed message: {}",
            message.summary()
        );

        message
    }

    /// Analyze a message with no session history
    pub fn analyze_standalone(&self, text: &str, persona_id: &str) -> ConversationMessage {
        let empty: [EmotionalState; 0] = [];
        self.analyze(text, persona_id, &empty)
    }
}

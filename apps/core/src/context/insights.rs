//! Relationship metrics derived from a session's context.

use serde::{Deserialize, Serialize};

use crate::brain::emotion::Trend;

use super::ConversationContext;

const MAX_TOP_TOPICS: usize = 5;
const QUALITY_BASE: f32 = 50.0;
const QUALITY_DEPTH_WEIGHT: f32 = 0.3;
const QUALITY_TRUST_WEIGHT: f32 = 0.2;
const QUALITY_PER_MEMORY: f32 = 5.0;
const QUALITY_MEMORY_CAP: f32 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationInsights {
    pub relationship_depth: f32,
    pub trust_level: f32,
    pub emotional_trend: Trend,
    /// Most discussed topics, most frequent first
    pub top_topics: Vec<String>,
    pub memory_count: usize,
    /// 0 - 100
    pub conversation_quality: f32,
}

impl ConversationInsights {
    pub fn from_context(context: &ConversationContext) -> Self {
        let memory_count = context.shared_memories().len();
        let memory_bonus = (memory_count as f32 * QUALITY_PER_MEMORY).min(QUALITY_MEMORY_CAP);
        let conversation_quality = (QUALITY_BASE
            + context.relationship_depth() * QUALITY_DEPTH_WEIGHT
            + context.trust_level() * QUALITY_TRUST_WEIGHT
            + memory_bonus)
            .clamp(0.0, 100.0);

        Self {
            relationship_depth: context.relationship_depth(),
            trust_level: context.trust_level(),
            emotional_trend: emotional_trend(context),
            top_topics: top_topics(context),
            memory_count,
            conversation_quality,
        }
    }
}

/// Trend of the latest journey entry against the ones before it.
fn emotional_trend(context: &ConversationContext) -> Trend {
    let journey = context.emotional_journey();
    match journey.len() {
        0 => Trend::Stable,
        n => Trend::from_journey(journey.range(..n - 1), &journey[n - 1]),
    }
}

/// Topics by frequency across the history, first appearance breaking ties.
fn top_topics(context: &ConversationContext) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for topic in context
        .message_history()
        .iter()
        .flat_map(|message| message.topics.iter())
    {
        match counts.iter_mut().find(|(t, _)| *t == topic.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((topic.as_str(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_TOP_TOPICS)
        .map(|(topic, _)| topic.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::emotion::{Emotion, EmotionalState};
    use crate::brain::intent::MessageIntent;
    use crate::brain::message::{ConversationMessage, Role};

    fn message(emotion: Emotion, intensity: f32, topics: &[&str]) -> ConversationMessage {
        ConversationMessage::new(
            Role::User,
            "话题".to_string(),
            "yuelao".to_string(),
            EmotionalState {
                primary: emotion,
                intensity,
                ..EmotionalState::neutral()
            },
            MessageIntent::default(),
            topics.iter().map(|t| t.to_string()).collect(),
            40.0,
        )
    }

    #[test]
    fn test_fresh_context_quality() {
        let insights = ConversationInsights::from_context(&ConversationContext::default());

        assert_eq!(insights.conversation_quality, 60.0);
        assert_eq!(insights.emotional_trend, Trend::Stable);
        assert!(insights.top_topics.is_empty());
        assert_eq!(insights.memory_count, 0);
    }

    #[test]
    fn test_top_topics_by_frequency() {
        let mut context = ConversationContext::default();
        context.record_message(message(Emotion::Trust, 30.0, &["love", "career"]));
        context.record_message(message(Emotion::Trust, 30.0, &["career"]));
        context.record_message(message(Emotion::Trust, 30.0, &["health", "love"]));
        context.record_message(message(Emotion::Trust, 30.0, &["travel"]));

        let insights = ConversationInsights::from_context(&context);
        assert_eq!(insights.top_topics, vec!["love", "career", "health", "travel"]);
    }

    #[test]
    fn test_trend_of_latest_entry() {
        let mut context = ConversationContext::default();
        context.record_message(message(Emotion::Sadness, 80.0, &[]));
        context.record_message(message(Emotion::Joy, 80.0, &[]));

        let insights = ConversationInsights::from_context(&context);
        assert_eq!(insights.emotional_trend, Trend::Rising);
    }
}

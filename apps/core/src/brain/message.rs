//! Conversation Message - Output structure for Brain analysis.
//!
//! One analyzed chat message with its emotion, intent, topics and
//! significance. Created once, never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::emotion::EmotionalState;
use super::intent::MessageIntent;

/// Who wrote the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Persona,
}

/// A fully classified chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Author of the message
    pub role: Role,
    /// Original text
    pub content: String,
    /// Time of analysis
    pub timestamp: DateTime<Utc>,
    /// Persona the message was addressed to (or written by)
    pub persona_id: String,
    /// Emotion detected in the text
    pub emotional_tone: EmotionalState,
    /// Purpose detected in the text
    pub intent: MessageIntent,
    /// Life-area topics mentioned, in order of appearance
    pub topics: Vec<String>,
    /// Importance for long-term memory (0 - 100)
    pub significance: f32,
}

impl ConversationMessage {
    /// Assemble a message from its analysis results
    pub fn new(
        role: Role,
        content: String,
        persona_id: String,
        emotional_tone: EmotionalState,
        intent: MessageIntent,
        topics: Vec<String>,
        significance: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now(),
            persona_id,
            emotional_tone,
            intent,
            topics,
            significance: significance.clamp(0.0, 100.0),
        }
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Emotion: {} ({:.0}), Intent: {} / {} ({:?}), Topics: [{}], Significance: {:.0}",
            self.emotional_tone.primary,
            self.emotional_tone.intensity,
            self.intent.category,
            self.intent.sub_category,
            self.intent.urgency,
            self.topics.join(", "),
            self.significance
        )
    }
}

//! Shared memories distilled from high-significance messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::emotion::Emotion;
use crate::brain::message::ConversationMessage;

/// Characters of the originating message kept in a memory.
const SNIPPET_CHARS: usize = 50;
/// Joyful messages above this significance are remembered as achievements.
const ACHIEVEMENT_SIGNIFICANCE: f32 = 80.0;
/// Messages more intense than this are remembered as milestones.
const MILESTONE_INTENSITY: f32 = 70.0;

/// Kind of thing a memory records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Milestone,
    RecurringTheme,
    PersonalDetail,
    Achievement,
    Challenge,
}

impl MemoryType {
    /// Picks the memory type for a message, first matching rule wins.
    pub fn classify(message: &ConversationMessage) -> MemoryType {
        let emotion = &message.emotional_tone;

        if emotion.primary == Emotion::Joy && message.significance > ACHIEVEMENT_SIGNIFICANCE {
            MemoryType::Achievement
        } else if emotion.intensity > MILESTONE_INTENSITY {
            MemoryType::Milestone
        } else if !message.topics.is_empty() {
            MemoryType::RecurringTheme
        } else {
            MemoryType::PersonalDetail
        }
    }
}

/// A session-lifetime note used to add continuity to later replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedMemory {
    pub id: String,
    pub memory_type: MemoryType,
    /// Start of the originating message
    pub content: String,
    /// Significance of the originating message (0 - 100)
    pub importance: f32,
    pub last_referenced: DateTime<Utc>,
    /// Emotional intensity of the originating message (0 - 100)
    pub emotional_significance: f32,
    /// Message the memory was created from
    pub source_message_id: String,
}

impl SharedMemory {
    pub fn from_message(message: &ConversationMessage) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            memory_type: MemoryType::classify(message),
            content: truncate_chars(&message.content, SNIPPET_CHARS),
            importance: message.significance.clamp(0.0, 100.0),
            last_referenced: message.timestamp,
            emotional_significance: message.emotional_tone.intensity.clamp(0.0, 100.0),
            source_message_id: message.id.clone(),
        }
    }
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

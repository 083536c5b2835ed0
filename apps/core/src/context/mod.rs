//! # Context Module
//!
//! Mutable per-session state: bounded message history, emotional journey,
//! topic flow, relationship metrics and shared memories.
//!
//! A context is owned by exactly one session and only ever touched by the
//! engine actor, so none of this needs locking.

pub mod insights;
pub mod memory;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::brain::emotion::EmotionalState;
use crate::brain::intent::IntentCategory;
use crate::brain::message::ConversationMessage;
use crate::config::EngineConfig;

pub use insights::ConversationInsights;
pub use memory::{truncate_chars, MemoryType, SharedMemory};

const INITIAL_TRUST: f32 = 50.0;
const DEPTH_PER_SIGNIFICANCE: f32 = 0.1;
const SUPPORT_TRUST_GAIN: f32 = 2.0;
const JOY_TRUST_GAIN: f32 = 1.0;

/// Capacity limits of one context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextLimits {
    pub history: usize,
    pub journey: usize,
    pub memories: usize,
    /// Significance a message must exceed to become a shared memory
    pub memory_threshold: f32,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for ContextLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            history: config.history_limit,
            journey: config.journey_limit,
            memories: config.memory_limit,
            memory_threshold: config.memory_threshold,
        }
    }
}

/// Owned, serializable copy of a context at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub session_id: String,
    pub user_id: Option<String>,
    pub message_history: Vec<ConversationMessage>,
    pub topic_flow: Vec<String>,
    pub emotional_journey: Vec<EmotionalState>,
    pub relationship_depth: f32,
    pub trust_level: f32,
    pub shared_memories: Vec<SharedMemory>,
    pub current_focus: Option<String>,
    pub unresolved: Vec<String>,
}

/// State of one conversation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    session_id: String,
    user_id: Option<String>,
    message_history: VecDeque<ConversationMessage>,
    topic_flow: Vec<String>,
    emotional_journey: VecDeque<EmotionalState>,
    relationship_depth: f32,
    trust_level: f32,
    shared_memories: Vec<SharedMemory>,
    current_focus: Option<String>,
    unresolved: Vec<String>,
    limits: ContextLimits,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ConversationContext {
    /// Fresh context with default limits
    pub fn new(user_id: Option<String>) -> Self {
        Self::with_limits(user_id, ContextLimits::default())
    }

    pub fn with_limits(user_id: Option<String>, limits: ContextLimits) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id,
            message_history: VecDeque::with_capacity(limits.history.min(64)),
            topic_flow: Vec::new(),
            emotional_journey: VecDeque::with_capacity(limits.journey.min(64)),
            relationship_depth: 0.0,
            trust_level: INITIAL_TRUST,
            shared_memories: Vec::new(),
            current_focus: None,
            unresolved: Vec::new(),
            limits,
        }
    }

    /// Rebuild a context from a snapshot, enforcing `limits` on the way in.
    pub fn restore(snapshot: ContextSnapshot, limits: ContextLimits) -> Self {
        let mut context = Self {
            session_id: snapshot.session_id,
            user_id: snapshot.user_id,
            message_history: snapshot.message_history.into(),
            topic_flow: Vec::new(),
            emotional_journey: snapshot.emotional_journey.into(),
            relationship_depth: snapshot.relationship_depth.clamp(0.0, 100.0),
            trust_level: snapshot.trust_level.clamp(0.0, 100.0),
            shared_memories: snapshot.shared_memories,
            current_focus: snapshot.current_focus,
            unresolved: snapshot.unresolved,
            limits,
        };
        for topic in snapshot.topic_flow {
            context.note_topic(topic);
        }
        truncate_front(&mut context.message_history, limits.history);
        truncate_front(&mut context.emotional_journey, limits.journey);
        context.prune_memories();
        context
    }

    /// Fold one analyzed message into the session state.
    pub fn record_message(&mut self, message: ConversationMessage) {
        self.emotional_journey
            .push_back(message.emotional_tone.clone());
        truncate_front(&mut self.emotional_journey, self.limits.journey);

        for topic in &message.topics {
            self.note_topic(topic.clone());
        }

        self.relationship_depth =
            (self.relationship_depth + message.significance * DEPTH_PER_SIGNIFICANCE).clamp(0.0, 100.0);
        let trust_gain = match message.intent.category {
            IntentCategory::EmotionalSupport => SUPPORT_TRUST_GAIN,
            IntentCategory::SharingJoy => JOY_TRUST_GAIN,
            _ => 0.0,
        };
        self.trust_level = (self.trust_level + trust_gain).clamp(0.0, 100.0);

        if message.significance > self.limits.memory_threshold {
            let memory = SharedMemory::from_message(&message);
            debug!(
                memory_type = ?memory.memory_type,
                importance = memory.importance,
                "Created shared memory"
            );
            self.shared_memories.push(memory);
            self.prune_memories();
        }

        if let Some(topic) = message.topics.last() {
            self.current_focus = Some(topic.clone());
        }

        self.message_history.push_back(message);
        truncate_front(&mut self.message_history, self.limits.history);
    }

    /// Mark a memory as just referenced. Returns false for unknown ids.
    pub fn touch_memory(&mut self, memory_id: &str) -> bool {
        match self.shared_memories.iter_mut().find(|m| m.id == memory_id) {
            Some(memory) => {
                memory.last_referenced = chrono::Utc::now();
                true
            }
            None => false,
        }
    }

    /// Replace everything with defaults under a new session id. Only the user id survives.
    pub fn reset(&mut self) {
        let user_id = self.user_id.take();
        *self = Self::with_limits(user_id, self.limits);
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            message_history: self.message_history.iter().cloned().collect(),
            topic_flow: self.topic_flow.clone(),
            emotional_journey: self.emotional_journey.iter().cloned().collect(),
            relationship_depth: self.relationship_depth,
            trust_level: self.trust_level,
            shared_memories: self.shared_memories.clone(),
            current_focus: self.current_focus.clone(),
            unresolved: self.unresolved.clone(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Messages oldest first
    pub fn message_history(&self) -> &VecDeque<ConversationMessage> {
        &self.message_history
    }

    pub fn last_message(&self) -> Option<&ConversationMessage> {
        self.message_history.back()
    }

    pub fn topic_flow(&self) -> &[String] {
        &self.topic_flow
    }

    /// Emotional states oldest first
    pub fn emotional_journey(&self) -> &VecDeque<EmotionalState> {
        &self.emotional_journey
    }

    pub fn relationship_depth(&self) -> f32 {
        self.relationship_depth
    }

    pub fn trust_level(&self) -> f32 {
        self.trust_level
    }

    /// Memories, most important first
    pub fn shared_memories(&self) -> &[SharedMemory] {
        &self.shared_memories
    }

    pub fn current_focus(&self) -> Option<&str> {
        self.current_focus.as_deref()
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn limits(&self) -> ContextLimits {
        self.limits
    }

    fn note_topic(&mut self, topic: String) {
        if !self.topic_flow.contains(&topic) {
            self.topic_flow.push(topic);
        }
    }

    /// Keep the most important memories, newer ones winning ties.
    fn prune_memories(&mut self) {
        self.shared_memories.sort_by(|a, b| {
            b.importance
                .total_cmp(&a.importance)
                .then_with(|| b.last_referenced.cmp(&a.last_referenced))
        });
        self.shared_memories.truncate(self.limits.memories);
    }
}

fn truncate_front<T>(buffer: &mut VecDeque<T>, cap: usize) {
    while buffer.len() > cap {
        buffer.pop_front();
    }
}

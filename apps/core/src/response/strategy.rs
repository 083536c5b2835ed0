//! Reply strategy: which approach, which emotional register, how deep.

use serde::{Deserialize, Serialize};

use crate::brain::emotion::Emotion;
use crate::brain::intent::ResponseType;
use crate::brain::message::ConversationMessage;
use crate::context::ConversationContext;
use crate::persona::{PersonaProfile, Tone};

/// Overall shape of a reply, picks the template pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    EmotionalValidation,
    SharedDelight,
    StructuredInsight,
    Celebration,
    Motivation,
    ActionableGuidance,
    SpiritualInsight,
}

impl Approach {
    pub fn label(&self) -> &'static str {
        match self {
            Approach::EmotionalValidation => "emotional_validation",
            Approach::SharedDelight => "shared_delight",
            Approach::StructuredInsight => "structured_insight",
            Approach::Celebration => "celebration",
            Approach::Motivation => "motivation",
            Approach::ActionableGuidance => "actionable_guidance",
            Approach::SpiritualInsight => "spiritual_insight",
        }
    }

    /// Joy turns the empathetic and encouraging approaches festive.
    pub fn select(response_type: ResponseType, emotion: Emotion) -> Approach {
        let joyful = emotion == Emotion::Joy;
        match response_type {
            ResponseType::Empathetic if joyful => Approach::SharedDelight,
            ResponseType::Empathetic => Approach::EmotionalValidation,
            ResponseType::Analytical => Approach::StructuredInsight,
            ResponseType::Encouraging if joyful => Approach::Celebration,
            ResponseType::Encouraging => Approach::Motivation,
            ResponseType::Practical => Approach::ActionableGuidance,
            ResponseType::Spiritual => Approach::SpiritualInsight,
        }
    }
}

/// Emotional register of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneLabel {
    DeepEmpathy,
    GentleComfort,
    SteadyReassurance,
    CalmGrounding,
    JoyfulCelebration,
    WarmAcknowledgement,
    BalancedWarmth,
}

impl ToneLabel {
    pub fn label(&self) -> &'static str {
        match self {
            ToneLabel::DeepEmpathy => "deep_empathy",
            ToneLabel::GentleComfort => "gentle_comfort",
            ToneLabel::SteadyReassurance => "steady_reassurance",
            ToneLabel::CalmGrounding => "calm_grounding",
            ToneLabel::JoyfulCelebration => "joyful_celebration",
            ToneLabel::WarmAcknowledgement => "warm_acknowledgement",
            ToneLabel::BalancedWarmth => "balanced_warmth",
        }
    }

    /// User emotion crossed with the persona's tone
    pub fn select(emotion: Emotion, persona_tone: Tone) -> ToneLabel {
        match (emotion, persona_tone) {
            (Emotion::Sadness, Tone::Compassionate) => ToneLabel::DeepEmpathy,
            (Emotion::Sadness, _) => ToneLabel::GentleComfort,
            (Emotion::Fear, _) => ToneLabel::SteadyReassurance,
            (Emotion::Anger, _) => ToneLabel::CalmGrounding,
            (Emotion::Joy, Tone::Cheerful | Tone::Warm) => ToneLabel::JoyfulCelebration,
            (Emotion::Joy, _) => ToneLabel::WarmAcknowledgement,
            _ => ToneLabel::BalancedWarmth,
        }
    }
}

/// How much continuity the reply may assume
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDepth {
    Moderate,
    Medium,
    Deep,
}

impl ContentDepth {
    pub fn from_relationship(depth: f32) -> ContentDepth {
        if depth > 70.0 {
            ContentDepth::Deep
        } else if depth > 40.0 {
            ContentDepth::Medium
        } else {
            ContentDepth::Moderate
        }
    }
}

/// Everything decided before any phrase is picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStrategy {
    pub primary_approach: Approach,
    pub emotional_tone: ToneLabel,
    pub content_depth: ContentDepth,
}

impl ResponseStrategy {
    pub fn decide(
        message: &ConversationMessage,
        persona: &PersonaProfile,
        context: &ConversationContext,
    ) -> Self {
        let emotion = message.emotional_tone.primary;
        Self {
            primary_approach: Approach::select(message.intent.expected_response_type, emotion),
            emotional_tone: ToneLabel::select(emotion, persona.communication_style.tone),
            content_depth: ContentDepth::from_relationship(context.relationship_depth()),
        }
    }
}

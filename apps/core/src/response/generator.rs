//! Response Generator - turns an analyzed message into a persona reply.
//!
//! Strategy, then template, then personalization, then memory integration,
//! then finalization. Reads the context, never writes it.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

use crate::brain::message::ConversationMessage;
use crate::config::EngineConfig;
use crate::context::{truncate_chars, ConversationContext, SharedMemory};
use crate::error::AppError;
use crate::persona::{voice_for, Formality, PersonaCatalog, PersonaVoice, Verbosity};

use super::strategy::{ContentDepth, ResponseStrategy};
use super::templates::{
    focus_reflection, generic_blessing, generic_empathy, memory_reference, templates_for,
    BLESSING_SLOT, EMPATHY_SLOT, GENERIC_CLOSING, GENERIC_GREETING, GENERIC_TEMPLATES,
    GENERIC_WISDOM, GREETING_SLOT, WISDOM_SLOT,
};

/// Relationship depth above which personas switch to their intimate greeting.
const INTIMATE_DEPTH: f32 = 50.0;
/// Characters of a memory quoted back to the user.
const MEMORY_QUOTE_CHARS: usize = 20;

/// A finished reply and the memory it mentioned, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedReply {
    pub text: String,
    pub strategy: ResponseStrategy,
    pub referenced_memory: Option<String>,
}

pub struct ResponseGenerator {
    catalog: Arc<PersonaCatalog>,
    memory_min_importance: f32,
    memory_probability: f64,
}

impl ResponseGenerator {
    pub fn new(catalog: Arc<PersonaCatalog>, config: &EngineConfig) -> Self {
        let probability = config.memory_reference_probability;
        Self {
            catalog,
            memory_min_importance: config.memory_reference_min_importance,
            memory_probability: if probability.is_finite() {
                probability.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    /// Compose the reply text for `message` in the voice of `persona_id`.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        message: &ConversationMessage,
        persona_id: &str,
        context: &ConversationContext,
        rng: &mut R,
    ) -> Result<String, AppError> {
        self.compose_reply(message, persona_id, context, rng)
            .map(|reply| reply.text)
    }

    /// Like [`compose`](Self::compose), also reporting the strategy and the referenced memory.
    pub fn compose_reply<R: Rng + ?Sized>(
        &self,
        message: &ConversationMessage,
        persona_id: &str,
        context: &ConversationContext,
        rng: &mut R,
    ) -> Result<ComposedReply, AppError> {
        let persona = self.catalog.require(persona_id)?;
        let voice = voice_for(persona_id);
        let strategy = ResponseStrategy::decide(message, persona, context);

        let template = templates_for(strategy.primary_approach)
            .choose(rng)
            .copied()
            .unwrap_or(GENERIC_TEMPLATES[0]);

        let emotion = message.emotional_tone.primary;
        let category = message.intent.category;
        let greeting = voice
            .map(|v| {
                if context.relationship_depth() > INTIMATE_DEPTH {
                    v.intimate_greeting
                } else {
                    v.greeting
                }
            })
            .unwrap_or(GENERIC_GREETING);
        let empathy = voice
            .and_then(|v| v.empathy_for(emotion))
            .unwrap_or_else(|| generic_empathy(strategy.emotional_tone));
        let wisdom = match voice {
            Some(v) => v.wisdom.choose(rng).copied().unwrap_or(GENERIC_WISDOM),
            None => GENERIC_WISDOM,
        };
        let blessing = voice
            .and_then(|v| v.blessing_for(category))
            .unwrap_or_else(|| generic_blessing(category));

        let formal = persona.communication_style.formality == Formality::Formal;
        let mut text = in_register(
            &template
                .replace(GREETING_SLOT, greeting)
                .replace(EMPATHY_SLOT, empathy)
                .replace(WISDOM_SLOT, wisdom)
                .replace(BLESSING_SLOT, blessing),
            formal,
        );

        let reflects = match strategy.content_depth {
            ContentDepth::Deep => true,
            ContentDepth::Medium => persona.communication_style.verbosity == Verbosity::Elaborate,
            ContentDepth::Moderate => false,
        };
        if reflects {
            if let Some(focus) = context.current_focus() {
                text.push_str(&in_register(&focus_reflection(focus), formal));
            }
        }

        // The user's own words are quoted as written, whatever the register
        let mut referenced_memory = None;
        if let Some(memory) = self.memorable(message, context) {
            if rng.gen_bool(self.memory_probability) {
                text.push_str(&memory_reference(
                    &truncate_chars(&memory.content, MEMORY_QUOTE_CHARS),
                    formal,
                ));
                referenced_memory = Some(memory.id.clone());
            }
        }

        text.push_str(&in_register(closing(voice, rng), formal));

        debug!(
            persona = persona_id,
            approach = strategy.primary_approach.label(),
            tone = strategy.emotional_tone.label(),
            depth = ?strategy.content_depth,
            memory = referenced_memory.is_some(),
            "Composed reply"
        );

        Ok(ComposedReply {
            text,
            strategy,
            referenced_memory,
        })
    }

    /// The most important memory worth recalling, never the one the current message created.
    fn memorable<'c>(
        &self,
        message: &ConversationMessage,
        context: &'c ConversationContext,
    ) -> Option<&'c SharedMemory> {
        context
            .shared_memories()
            .iter()
            .filter(|m| m.importance > self.memory_min_importance)
            .filter(|m| m.source_message_id != message.id)
            .fold(None, |best: Option<&SharedMemory>, m| match best {
                Some(b) if b.importance >= m.importance => Some(b),
                _ => Some(m),
            })
    }
}

/// Formal personas address the user as 您
fn in_register(phrase: &str, formal: bool) -> String {
    if formal {
        phrase.replace('你', "您")
    } else {
        phrase.to_string()
    }
}

fn closing<R: Rng + ?Sized>(voice: Option<&'static PersonaVoice>, rng: &mut R) -> &'static str {
    voice
        .and_then(|v| v.closings.choose(rng).copied())
        .unwrap_or(GENERIC_CLOSING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::analyzer::MessageAnalyzer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(probability: f64) -> ResponseGenerator {
        let config = EngineConfig {
            memory_reference_probability: probability,
            ..EngineConfig::instant(1)
        };
        ResponseGenerator::new(Arc::new(PersonaCatalog::builtin()), &config)
    }

    #[test]
    fn test_unknown_persona() {
        let generator = generator(0.0);
        let context = ConversationContext::default();
        let message = MessageAnalyzer::new().analyze_standalone("你好", "zeus");
        let mut rng = StdRng::seed_from_u64(3);

        match generator.compose(&message, "zeus", &context, &mut rng) {
            Err(AppError::UnknownPersona(id)) => assert_eq!(id, "zeus"),
            other => panic!("Expected UnknownPersona, got {:?}", other),
        }
    }

    #[test]
    fn test_same_seed_same_reply() {
        let generator = generator(0.3);
        let context = ConversationContext::default();
        let message = MessageAnalyzer::new().analyze_standalone("我最近很难过", "yuelao");

        let a = generator
            .compose(&message, "yuelao", &context, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = generator
            .compose(&message, "yuelao", &context, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_formal_register() {
        let generator = generator(0.0);
        let context = ConversationContext::default();
        let message = MessageAnalyzer::new().analyze_standalone("我最近很难过，工作压力很大", "guanyin");

        for seed in 0..20 {
            let reply = generator
                .compose(&message, "guanyin", &context, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(!reply.contains('你'), "formal reply used 你: {}", reply);
            assert!(reply.starts_with("善信，"));
        }
    }

    #[test]
    fn test_nan_probability_never_references() {
        let generator = generator(f64::NAN);
        let mut context = ConversationContext::default();
        let analyzer = MessageAnalyzer::new();
        context.record_message(analyzer.analyze_standalone("我最近很难过，工作压力很大", "guanyin"));
        let message = analyzer.analyze("你好", "guanyin", context.emotional_journey());

        let reply = generator
            .compose_reply(&message, "guanyin", &context, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert!(reply.referenced_memory.is_none());
    }
}

//! Response Module Tests
//!
//! Reply composition against real analyzed messages and evolving contexts.

use crate::brain::MessageAnalyzer;
use crate::config::EngineConfig;
use crate::context::ConversationContext;
use crate::persona::{voice_for, Formality, PersonaCatalog};
use crate::response::templates::{
    generic_blessing, generic_empathy, GENERIC_CLOSING, GENERIC_GREETING, GENERIC_WISDOM,
};
use crate::response::{Approach, ContentDepth, ResponseGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const SAD_AT_WORK: &str = "我最近很难过，工作压力很大";

fn generator(memory_probability: f64) -> ResponseGenerator {
    let config = EngineConfig {
        memory_reference_probability: memory_probability,
        ..EngineConfig::instant(11)
    };
    ResponseGenerator::new(Arc::new(PersonaCatalog::builtin()), &config)
}

/// Records `count` copies of `text` and returns the analyzed last one.
fn converse(
    context: &mut ConversationContext,
    text: &str,
    persona_id: &str,
    count: usize,
) -> crate::brain::ConversationMessage {
    let analyzer = MessageAnalyzer::new();
    let mut last = None;
    for _ in 0..count {
        let message = analyzer.analyze(text, persona_id, context.emotional_journey());
        context.record_message(message.clone());
        last = Some(message);
    }
    last.expect("count must be positive")
}

#[cfg(test)]
mod composition_tests {
    use super::*;

    #[test]
    fn test_reference_scenario_reply() {
        let generator = generator(0.0);
        let mut context = ConversationContext::default();
        let message = converse(&mut context, SAD_AT_WORK, "guanyin", 1);
        let mut rng = StdRng::seed_from_u64(5);

        let reply = generator
            .compose_reply(&message, "guanyin", &context, &mut rng)
            .expect("guanyin is built in");

        assert_eq!(reply.strategy.primary_approach, Approach::EmotionalValidation);
        assert_eq!(reply.strategy.content_depth, ContentDepth::Moderate);
        assert!(reply.text.starts_with("善信，"));
        assert!(reply.text.contains("您心中的苦，我都看见了"));
        assert!(!reply.text.contains('你'));
        let closings = voice_for("guanyin").map(|v| v.closings).unwrap_or_default();
        assert!(closings
            .iter()
            .any(|c| reply.text.ends_with(&c.replace('你', "您"))));
        assert!(reply.referenced_memory.is_none());
    }

    #[test]
    fn test_casual_persona_keeps_informal_register() {
        let generator = generator(0.0);
        let mut context = ConversationContext::default();
        let message = converse(&mut context, "太开心了！", "yuelao", 1);

        let reply = generator
            .compose(&message, "yuelao", &context, &mut StdRng::seed_from_u64(2))
            .expect("yuelao is built in");
        assert!(reply.starts_with("有缘人，"));
        assert!(reply.contains("哈哈，瞧你乐的"));
    }

    #[test]
    fn test_intimate_greeting_once_close() {
        let generator = generator(0.0);
        let mut context = ConversationContext::default();
        let message = converse(&mut context, SAD_AT_WORK, "guanyin", 7);
        assert!(context.relationship_depth() > 50.0);

        let reply = generator
            .compose(&message, "guanyin", &context, &mut StdRng::seed_from_u64(8))
            .expect("guanyin is built in");
        assert!(reply.starts_with("孩子，"));
    }

    #[test]
    fn test_focus_reflection_by_depth_and_verbosity() {
        let generator = generator(0.0);
        let mut context = ConversationContext::default();
        // Five messages at significance 82 put the relationship just past medium depth
        let message = converse(&mut context, SAD_AT_WORK, "guanyin", 5);
        assert!(context.relationship_depth() > 40.0 && context.relationship_depth() <= 70.0);

        let elaborate = generator
            .compose(&message, "guanyin", &context, &mut StdRng::seed_from_u64(1))
            .expect("guanyin is built in");
        assert!(elaborate.contains("关于事业的事"));

        let concise = generator
            .compose(&message, "caishen", &context, &mut StdRng::seed_from_u64(1))
            .expect("caishen is built in");
        assert!(!concise.contains("关于事业的事"));
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    /// Builtin personas plus one that has a profile but no phrase tables
    fn catalog_with_voiceless_persona() -> PersonaCatalog {
        let builtin = PersonaCatalog::builtin();
        let mut tudigong = builtin
            .get("caishen")
            .cloned()
            .expect("caishen is built in");
        tudigong.id = "tudigong".to_string();
        tudigong.name = "土地公".to_string();
        tudigong.communication_style.formality = Formality::Casual;

        let mut profiles = builtin.all().to_vec();
        profiles.push(tudigong);
        PersonaCatalog::new(profiles)
    }

    #[test]
    fn test_persona_without_voice_uses_generic_phrases() {
        assert!(voice_for("tudigong").is_none());
        let generator = ResponseGenerator::new(
            Arc::new(catalog_with_voiceless_persona()),
            &EngineConfig::instant(11),
        );
        let mut context = ConversationContext::default();
        let message = converse(&mut context, SAD_AT_WORK, "tudigong", 1);

        let mut saw_wisdom = false;
        for seed in 0..20 {
            let reply = generator
                .compose_reply(&message, "tudigong", &context, &mut StdRng::seed_from_u64(seed))
                .expect("tudigong is in the catalog");

            assert!(reply.text.starts_with(GENERIC_GREETING), "{}", reply.text);
            assert!(reply.text.ends_with(GENERIC_CLOSING), "{}", reply.text);
            assert!(reply.text.contains(generic_empathy(reply.strategy.emotional_tone)));
            assert!(reply.text.contains(generic_blessing(message.intent.category)));
            saw_wisdom |= reply.text.contains(GENERIC_WISDOM);
        }
        assert!(saw_wisdom);
    }
}

#[cfg(test)]
mod memory_integration_tests {
    use super::*;

    #[test]
    fn test_memory_reference_when_certain() {
        let generator = generator(1.0);
        let mut context = ConversationContext::default();
        converse(&mut context, SAD_AT_WORK, "guanyin", 1);
        let message = converse(&mut context, "你好", "guanyin", 1);

        let reply = generator
            .compose_reply(&message, "guanyin", &context, &mut StdRng::seed_from_u64(4))
            .expect("guanyin is built in");

        assert!(reply.text.contains("还记得您说过的“我最近很难过，工作压力很大”吗？"));
        assert_eq!(
            reply.referenced_memory.as_deref(),
            context.shared_memories().first().map(|m| m.id.as_str())
        );
    }

    #[test]
    fn test_never_references_its_own_message() {
        let generator = generator(1.0);
        let mut context = ConversationContext::default();
        let message = converse(&mut context, SAD_AT_WORK, "guanyin", 1);

        let reply = generator
            .compose_reply(&message, "guanyin", &context, &mut StdRng::seed_from_u64(4))
            .expect("guanyin is built in");
        assert!(reply.referenced_memory.is_none());
        assert!(!reply.text.contains("还记得"));
    }

    #[test]
    fn test_no_reference_when_disabled() {
        let generator = generator(0.0);
        let mut context = ConversationContext::default();
        converse(&mut context, SAD_AT_WORK, "guanyin", 3);
        let message = converse(&mut context, "你好", "guanyin", 1);

        for seed in 0..10 {
            let reply = generator
                .compose(&message, "guanyin", &context, &mut StdRng::seed_from_u64(seed))
                .expect("guanyin is built in");
            assert!(!reply.contains("还记得"));
        }
    }

    #[test]
    fn test_formal_register_keeps_the_quote_verbatim() {
        let generator = generator(1.0);
        let mut context = ConversationContext::default();
        converse(&mut context, "你怎么不理我，我很难过，救命", "guanyin", 1);
        let message = converse(&mut context, "嗯", "guanyin", 1);

        let reply = generator
            .compose(&message, "guanyin", &context, &mut StdRng::seed_from_u64(4))
            .expect("guanyin is built in");
        assert!(
            reply.contains("还记得您说过的“你怎么不理我，我很难过，救命”吗？"),
            "{}",
            reply
        );
    }

    #[test]
    fn test_quote_is_truncated() {
        let generator = generator(1.0);
        let mut context = ConversationContext::default();
        let long = "我最近很难过，工作压力很大，老板天天让我加班，同事也不理解我，真不知道该怎么办";
        converse(&mut context, long, "yuelao", 1);
        let message = converse(&mut context, "嗯", "yuelao", 1);

        let reply = generator
            .compose(&message, "yuelao", &context, &mut StdRng::seed_from_u64(4))
            .expect("yuelao is built in");
        let quote: String = long.chars().take(20).collect();
        assert!(reply.contains(&format!("“{}”", quote)));
    }
}

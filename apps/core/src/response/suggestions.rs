//! Quick-reply suggestions offered under the input box.

use crate::brain::emotion::Emotion;
use crate::context::ConversationContext;
use crate::persona::voice_for;

use super::templates::topic_name;

pub const MAX_SUGGESTIONS: usize = 4;

const GENERIC_SUGGESTIONS: &[&str] = &["最近运势如何", "我有些心事想聊聊", "给我一句鼓励的话", "帮我理理思路"];

fn emotional_follow_up(emotion: Emotion) -> Option<&'static str> {
    match emotion {
        Emotion::Sadness | Emotion::Fear => Some("我想再多说说心里的感受"),
        Emotion::Anger => Some("帮我平复一下情绪"),
        Emotion::Joy => Some("还有好消息想和你分享"),
        Emotion::Anticipation => Some("接下来我该做些什么准备"),
        _ => None,
    }
}

/// Suggestions for `persona_id`, tailored to `context` when it has any history.
pub fn quick_suggestions(persona_id: &str, context: Option<&ConversationContext>) -> Vec<String> {
    let defaults = voice_for(persona_id)
        .map(|v| v.suggestions)
        .unwrap_or(GENERIC_SUGGESTIONS);

    let mut suggestions: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
    if let Some(last) = context.and_then(ConversationContext::last_message) {
        if let Some(follow_up) = emotional_follow_up(last.emotional_tone.primary) {
            suggestions.push(follow_up.to_string());
        }
    }
    if let Some(focus) = context.and_then(ConversationContext::current_focus) {
        suggestions.push(format!("{}方面还要注意什么", topic_name(focus)));
    }

    for default in defaults {
        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
        if !suggestions.iter().any(|s| s == default) {
            suggestions.push(default.to_string());
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::analyzer::MessageAnalyzer;

    #[test]
    fn test_fixed_list_without_history() {
        let fresh = ConversationContext::default();
        let expected: Vec<String> = voice_for("caishen")
            .map(|v| v.suggestions.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default();

        assert_eq!(quick_suggestions("caishen", None), expected);
        assert_eq!(quick_suggestions("caishen", Some(&fresh)), expected);
    }

    #[test]
    fn test_context_aware_suggestions() {
        let mut context = ConversationContext::default();
        context.record_message(
            MessageAnalyzer::new().analyze_standalone("我最近很难过，工作压力很大", "guanyin"),
        );

        let suggestions = quick_suggestions("guanyin", Some(&context));
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "我想再多说说心里的感受");
        assert_eq!(suggestions[1], "事业方面还要注意什么");
    }

    #[test]
    fn test_unknown_voice_uses_generic_list() {
        assert_eq!(quick_suggestions("custom", None).len(), MAX_SUGGESTIONS);
    }
}

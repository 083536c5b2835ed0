//! # Brain Module
//!
//! Fast, rule-based analysis of user messages.
//! Runs before any reply is composed to classify what the user feels and wants.
//!
//! ## Components
//! - `emotion`: Lexicon-based emotion scoring and trigger extraction
//! - `intent`: Intent classification using regex patterns and keywords
//! - `topics`: Life-area topic extraction
//! - `message`: Output data structure
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod emotion;
pub mod intent;
pub mod message;
pub mod topics;

// Re-export main types for convenience
pub use analyzer::{significance, MessageAnalyzer};
pub use emotion::{Emotion, EmotionalAnalyzer, EmotionalState, Trend};
pub use intent::{IntentAnalyzer, IntentCategory, MessageIntent, ResponseType, Urgency};
pub use message::{ConversationMessage, Role};
pub use topics::TopicExtractor;

/// Byte offsets where `keyword` occurs in `text` as a whole token.
///
/// ASCII keywords must not touch other ASCII letters or digits, so "joy" is
/// not found in "enjoy". CJK keywords have no word boundaries and match
/// anywhere.
pub(crate) fn keyword_matches<'a>(
    text: &'a str,
    keyword: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    let is_word = |c: char| c.is_ascii_alphanumeric();
    let open_start = keyword.chars().next().is_some_and(is_word);
    let open_end = keyword.chars().next_back().is_some_and(is_word);

    text.match_indices(keyword).filter_map(move |(idx, _)| {
        let end = idx + keyword.len();
        let joined_before = open_start && text[..idx].chars().next_back().is_some_and(is_word);
        let joined_after = open_end && text[end..].chars().next().is_some_and(is_word);
        (!joined_before && !joined_after).then_some(idx)
    })
}

/// Whether `keyword` occurs in `text` as a whole token
pub(crate) fn contains_keyword(text: &str, keyword: &str) -> bool {
    keyword_matches(text, keyword).next().is_some()
}

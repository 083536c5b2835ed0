//! # Response Module
//!
//! Template-based reply composition in a persona's voice, plus the
//! thinking delay applied before a reply is delivered and the quick-reply
//! suggestions shown alongside it.

pub mod generator;
pub mod pacing;
pub mod strategy;
pub mod suggestions;
pub mod templates;

pub use generator::{ComposedReply, ResponseGenerator};
pub use pacing::thinking_delay;
pub use strategy::{Approach, ContentDepth, ResponseStrategy, ToneLabel};
pub use suggestions::{quick_suggestions, MAX_SUGGESTIONS};

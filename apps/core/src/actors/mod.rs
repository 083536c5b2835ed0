//! # Actors Module
//!
//! The engine actor (`engine`) owns every session and processes one command
//! at a time; callers talk to it through a cloneable `EngineHandle`.

pub mod engine;
pub mod messages;
pub mod traits;

pub use engine::EngineHandle;
pub use messages::{ActorError, EngineMessage, PendingReply};
pub use traits::{ReplyPacer, SleepPacer};

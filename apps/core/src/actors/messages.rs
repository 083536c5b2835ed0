use serde::Serialize;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::context::{ContextSnapshot, ConversationInsights};

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The engine actor is no longer receiving commands.
    #[error("Engine stopped: {0}")]
    Stopped(String),
    /// The engine dropped a request without answering it.
    #[error("No reply from engine: {0}")]
    NoReply(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Channel the engine answers a single request on.
pub type Responder<T> = oneshot::Sender<Result<T, AppError>>;

/// A reply that is ready but not yet due.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub text: String,
    /// How long to hold the reply back before delivering it
    pub delay: Duration,
}

/// Messages that can be sent to the engine actor.
#[derive(Debug)]
pub enum EngineMessage {
    /// Analyze a user message, record it and compose the persona's reply.
    Respond {
        session_id: String,
        persona_id: String,
        content: String,
        responder: Responder<PendingReply>,
    },
    /// Quick replies for a persona, tailored to the session when it exists.
    Suggestions {
        persona_id: String,
        session_id: Option<String>,
        responder: Responder<Vec<String>>,
    },
    /// Relationship metrics of a session.
    Insights {
        session_id: String,
        responder: Responder<ConversationInsights>,
    },
    /// Owned copy of a session's context.
    Snapshot {
        session_id: String,
        responder: Responder<ContextSnapshot>,
    },
    /// Start a session over under a fresh context.
    Reset {
        session_id: String,
        responder: Responder<()>,
    },
    /// A command to shut down the engine.
    Shutdown,
}

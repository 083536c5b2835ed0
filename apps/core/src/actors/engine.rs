use lru::LruCache;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::actors::messages::{ActorError, AppError, EngineMessage, PendingReply, Responder};
use crate::actors::traits::{ReplyPacer, SleepPacer};
use crate::brain::analyzer::MessageAnalyzer;
use crate::config::EngineConfig;
use crate::context::{ContextLimits, ContextSnapshot, ConversationContext, ConversationInsights};
use crate::persona::{PersonaCatalog, PersonaProfile};
use crate::response::{quick_suggestions, thinking_delay, ResponseGenerator};

/// A handle to the engine actor.
///
/// This is the primary entry point of the library. Cloning is cheap; every
/// clone talks to the same actor, which owns all sessions.
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineMessage>,
    catalog: Arc<PersonaCatalog>,
    pacer: Arc<dyn ReplyPacer>,
}

impl EngineHandle {
    /// Spawns an engine with the built-in personas and a real-time pacer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: EngineConfig) -> Result<Self, AppError> {
        Self::with_parts(config, Arc::new(PersonaCatalog::builtin()), Arc::new(SleepPacer))
    }

    /// Spawns an engine with an explicit catalog and pacer.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated before anything is spawned.
    /// * `catalog` - Personas the engine may answer as.
    /// * `pacer` - Waits out the thinking delay of each reply.
    pub fn with_parts(
        config: EngineConfig,
        catalog: Arc<PersonaCatalog>,
        pacer: Arc<dyn ReplyPacer>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let runner = EngineRunner::new(receiver, catalog.clone(), &config)?;
        tokio::spawn(async move { runner.run().await });
        Ok(Self {
            sender,
            catalog,
            pacer,
        })
    }

    /// Answers a user message as `persona_id` within `session_id`.
    ///
    /// The session is created on first use and reset when the persona
    /// changes. The reply resolves after the thinking delay; the session
    /// state is already updated by then, so dropping the future only loses
    /// the reply.
    #[instrument(skip(self, content))]
    pub async fn respond(
        &self,
        session_id: &str,
        persona_id: &str,
        content: &str,
    ) -> Result<String, AppError> {
        let reply = self
            .request(|responder| EngineMessage::Respond {
                session_id: session_id.to_string(),
                persona_id: persona_id.to_string(),
                content: content.to_string(),
                responder,
            })
            .await?;
        self.pacer.pause(reply.delay).await;
        Ok(reply.text)
    }

    /// Looks up a persona without going through the actor.
    pub fn persona(&self, persona_id: &str) -> Option<PersonaProfile> {
        self.catalog.get(persona_id).cloned()
    }

    pub fn personas(&self) -> &[PersonaProfile] {
        self.catalog.all()
    }

    /// Up to four quick replies for `persona_id`, tailored to the session when one is given.
    #[instrument(skip(self))]
    pub async fn quick_suggestions(
        &self,
        persona_id: &str,
        session_id: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        self.request(|responder| EngineMessage::Suggestions {
            persona_id: persona_id.to_string(),
            session_id: session_id.map(str::to_string),
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn insights(&self, session_id: &str) -> Result<ConversationInsights, AppError> {
        self.request(|responder| EngineMessage::Insights {
            session_id: session_id.to_string(),
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self, session_id: &str) -> Result<ContextSnapshot, AppError> {
        self.request(|responder| EngineMessage::Snapshot {
            session_id: session_id.to_string(),
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn reset_session(&self, session_id: &str) -> Result<(), AppError> {
        self.request(|responder| EngineMessage::Reset {
            session_id: session_id.to_string(),
            responder,
        })
        .await
    }

    /// Stops the actor. Later requests fail with `ActorError::Stopped`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(EngineMessage::Shutdown)
            .await
            .map_err(|e| ActorError::Stopped(e.to_string()))?;
        Ok(())
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Responder<T>) -> EngineMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| ActorError::Stopped(e.to_string()))?;
        recv.await
            .map_err(|e| ActorError::NoReply(e.to_string()))?
    }
}

/// One conversation, bound to the persona it is held with
struct Session {
    persona_id: String,
    context: ConversationContext,
}

// --- Actor Runner ---
struct EngineRunner {
    receiver: mpsc::Receiver<EngineMessage>,
    analyzer: MessageAnalyzer,
    generator: ResponseGenerator,
    sessions: LruCache<String, Session>,
    rng: StdRng,
    limits: ContextLimits,
    delay_scale: f64,
}

impl EngineRunner {
    fn new(
        receiver: mpsc::Receiver<EngineMessage>,
        catalog: Arc<PersonaCatalog>,
        config: &EngineConfig,
    ) -> Result<Self, AppError> {
        let capacity = NonZeroUsize::new(config.max_sessions)
            .ok_or_else(|| AppError::Config("max_sessions must be non-zero".to_string()))?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            receiver,
            analyzer: MessageAnalyzer::new(),
            generator: ResponseGenerator::new(catalog, config),
            sessions: LruCache::new(capacity),
            rng,
            limits: ContextLimits::from(config),
            delay_scale: config.thinking_delay_scale,
        })
    }

    async fn run(mut self) {
        info!("Engine started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, EngineMessage::Shutdown) {
                info!("Engine shutting down...");
                break;
            }
            self.handle_message(msg);
        }
        info!(sessions = self.sessions.len(), "Engine stopped");
    }

    fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::Respond {
                session_id,
                persona_id,
                content,
                responder,
            } => {
                let result = self.handle_respond(session_id, persona_id, content);
                if let Err(e) = &result {
                    warn!("Error responding to message: {}", e);
                }
                let _ = responder.send(result);
            }
            EngineMessage::Suggestions {
                persona_id,
                session_id,
                responder,
            } => {
                let _ = responder.send(self.handle_suggestions(&persona_id, session_id.as_deref()));
            }
            EngineMessage::Insights {
                session_id,
                responder,
            } => {
                let result = self
                    .session(&session_id)
                    .map(|s| ConversationInsights::from_context(&s.context));
                let _ = responder.send(result);
            }
            EngineMessage::Snapshot {
                session_id,
                responder,
            } => {
                let result = self.session(&session_id).map(|s| s.context.snapshot());
                let _ = responder.send(result);
            }
            EngineMessage::Reset {
                session_id,
                responder,
            } => {
                let result = self.handle_reset(&session_id);
                let _ = responder.send(result);
            }
            EngineMessage::Shutdown => {}
        }
    }

    #[instrument(skip(self, content))]
    fn handle_respond(
        &mut self,
        session_id: String,
        persona_id: String,
        content: String,
    ) -> Result<PendingReply, AppError> {
        // Validate before touching any session state.
        self.generator.catalog().require(&persona_id)?;

        if !self.sessions.contains(&session_id) {
            let session = Session {
                persona_id: persona_id.clone(),
                context: ConversationContext::with_limits(None, self.limits),
            };
            if let Some((evicted, _)) = self.sessions.push(session_id.clone(), session) {
                warn!(session_id = %evicted, "Session store full, evicted least recently used session");
            }
            info!("Session created");
        }
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::Internal(format!("Session {} vanished", session_id)))?;

        if session.persona_id != persona_id {
            warn!(
                from = %session.persona_id,
                to = %persona_id,
                "Persona switched, resetting session context"
            );
            session.context.reset();
            session.persona_id = persona_id.clone();
        }

        let message = self
            .analyzer
            .analyze(&content, &persona_id, session.context.emotional_journey());
        session.context.record_message(message.clone());

        let reply = self
            .generator
            .compose_reply(&message, &persona_id, &session.context, &mut self.rng)?;
        if let Some(memory_id) = &reply.referenced_memory {
            session.context.touch_memory(memory_id);
        }

        let delay = thinking_delay(&message, self.delay_scale, &mut self.rng);
        debug!(delay_ms = delay.as_millis() as u64, "Reply ready");

        Ok(PendingReply {
            text: reply.text,
            delay,
        })
    }

    fn handle_suggestions(
        &mut self,
        persona_id: &str,
        session_id: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        self.generator.catalog().require(persona_id)?;
        let context = session_id
            .and_then(|id| self.sessions.peek(id))
            .filter(|s| s.persona_id == persona_id)
            .map(|s| &s.context);
        Ok(quick_suggestions(persona_id, context))
    }

    fn handle_reset(&mut self, session_id: &str) -> Result<(), AppError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))?;
        session.context.reset();
        info!(session_id, "Session reset");
        Ok(())
    }

    fn session(&mut self, session_id: &str) -> Result<&Session, AppError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))
    }
}

//! # Persona Module
//!
//! Static persona profiles (`catalog`) and the phrase tables that give each
//! of them a distinct voice (`voice`).

pub mod catalog;
pub mod voice;

pub use catalog::{CommunicationStyle, Formality, PersonaCatalog, PersonaProfile, Tone, Verbosity};
pub use voice::{voice_for, PersonaVoice};

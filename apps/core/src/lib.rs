//! OracleChat core: a rule-based companion conversation engine.
//!
//! User messages are classified (`brain`), folded into per-session state
//! (`context`) and answered from template tables in the voice of one of the
//! deity personas (`persona`, `response`). The `actors` module ties it all
//! together behind an async handle.

pub mod actors;
pub mod brain;
pub mod config;
pub mod context;
pub mod error;
pub mod persona;
pub mod response;
pub mod telemetry;

pub use actors::EngineHandle;
pub use config::EngineConfig;
pub use error::AppError;

#[cfg(test)]
mod tests;

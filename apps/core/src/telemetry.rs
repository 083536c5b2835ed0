//! Global tracing subscriber setup.

use std::env;
use std::io;

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::ENV_PREFIX;
use crate::error::AppError;

/// Log format selected by `ORACLE_LOG_JSON`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// Bunyan JSON records
    Json,
}

impl LogFormat {
    /// `ORACLE_LOG_JSON=1` (or `true`) selects JSON, anything else the pretty format.
    pub fn from_env() -> Self {
        match env::var(format!("{}LOG_JSON", ENV_PREFIX)) {
            Ok(value) if matches!(value.trim(), "1" | "true" | "TRUE" | "yes") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays free for chat output.
///
/// The level comes from `RUST_LOG`; `info` when unset.
/// Fails if a global subscriber is already set.
pub fn init_tracing(app_name: &str, format: LogFormat) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (json_layers, fmt_layer) = match format {
        LogFormat::Json => (
            Some(
                JsonStorageLayer
                    .and_then(BunyanFormattingLayer::new(app_name.to_string(), io::stderr)),
            ),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true),
            ),
        ),
    };

    Registry::default()
        .with(env_filter)
        .with(json_layers)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to set global subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_env() {
        temp_env::with_var("ORACLE_LOG_JSON", Some("1"), || {
            assert_eq!(LogFormat::from_env(), LogFormat::Json);
        });
        temp_env::with_var("ORACLE_LOG_JSON", Some("0"), || {
            assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        });
        temp_env::with_var_unset("ORACLE_LOG_JSON", || {
            assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        });
    }
}

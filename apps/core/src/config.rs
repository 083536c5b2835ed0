use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Prefix shared by every environment variable the engine reads.
pub const ENV_PREFIX: &str = "ORACLE_";

/// Tunable limits and product constants of the conversation engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct EngineConfig {
    /// Number of messages kept in a session's history.
    #[validate(range(min = 1, max = 10_000))]
    pub history_limit: usize,
    /// Number of emotional snapshots kept in a session's journey.
    #[validate(range(min = 1, max = 1_000))]
    pub journey_limit: usize,
    /// Maximum number of shared memories per session.
    #[validate(range(min = 1, max = 1_000))]
    pub memory_limit: usize,
    /// A message must be strictly more significant than this to become a memory.
    #[validate(range(min = 0.0, max = 100.0), custom(function = "finite_f32"))]
    pub memory_threshold: f32,
    /// Memories at or below this importance are never referenced in replies.
    #[validate(range(min = 0.0, max = 100.0), custom(function = "finite_f32"))]
    pub memory_reference_min_importance: f32,
    /// Chance that a reply mentions the most important memory.
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite_f64"))]
    pub memory_reference_probability: f64,
    /// Sessions held in memory before the least recently used one is evicted.
    #[validate(range(min = 1))]
    pub max_sessions: usize,
    /// Multiplier applied to the thinking delay. Zero disables it.
    #[validate(range(min = 0.0, max = 10.0), custom(function = "finite_f64"))]
    pub thinking_delay_scale: f64,
    /// Seed for phrase selection. Random when absent.
    pub rng_seed: Option<u64>,
    /// Capacity of the engine's command channel.
    #[validate(range(min = 1, max = 4_096))]
    pub channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            journey_limit: 20,
            memory_limit: 20,
            memory_threshold: 70.0,
            memory_reference_min_importance: 60.0,
            memory_reference_probability: 0.3,
            max_sessions: 1024,
            thinking_delay_scale: 1.0,
            rng_seed: None,
            channel_capacity: 32,
        }
    }
}

// NaN passes every range check, so floats are also checked for finiteness.
fn finite_f32(value: f32) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

fn finite_f64(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

/// Reads `ORACLE_<key>` and parses it, keeping `default` when unset.
fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    let name = format!("{}{}", ENV_PREFIX, key);
    match env::var(&name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

impl EngineConfig {
    /// Loads a `.env` file if one is present, then reads `ORACLE_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_process_env()
    }

    /// Loads variables from the given env file, then reads `ORACLE_*` variables.
    ///
    /// Variables already set in the process environment take precedence.
    pub fn from_env_file(path: &Path) -> Result<Self, AppError> {
        dotenv::from_path(path)
            .map_err(|e| AppError::Config(format!("Cannot load {}: {}", path.display(), e)))?;
        Self::from_process_env()
    }

    fn from_process_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let rng_seed = match env::var(format!("{}RNG_SEED", ENV_PREFIX)) {
            Ok(_) => Some(env_or("RNG_SEED", 0u64)?),
            Err(_) => defaults.rng_seed,
        };

        let config = Self {
            history_limit: env_or("HISTORY_LIMIT", defaults.history_limit)?,
            journey_limit: env_or("JOURNEY_LIMIT", defaults.journey_limit)?,
            memory_limit: env_or("MEMORY_LIMIT", defaults.memory_limit)?,
            memory_threshold: env_or("MEMORY_THRESHOLD", defaults.memory_threshold)?,
            memory_reference_min_importance: env_or(
                "MEMORY_REFERENCE_MIN_IMPORTANCE",
                defaults.memory_reference_min_importance,
            )?,
            memory_reference_probability: env_or(
                "MEMORY_REFERENCE_PROBABILITY",
                defaults.memory_reference_probability,
            )?,
            max_sessions: env_or("MAX_SESSIONS", defaults.max_sessions)?,
            thinking_delay_scale: env_or("THINKING_DELAY_SCALE", defaults.thinking_delay_scale)?,
            rng_seed,
            channel_capacity: env_or("CHANNEL_CAPACITY", defaults.channel_capacity)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// A configuration for tests and tools: no thinking delay, fixed seed.
    pub fn instant(seed: u64) -> Self {
        Self {
            thinking_delay_scale: 0.0,
            rng_seed: Some(seed),
            ..Self::default()
        }
    }
}

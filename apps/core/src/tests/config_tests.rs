//! Configuration Tests
//!
//! `ORACLE_*` environment variables and `.env` files. Every test that
//! touches the process environment goes through `temp_env`, which restores
//! it afterwards and serializes access.

use crate::config::EngineConfig;
use crate::error::AppError;
use std::io::Write;

const KEYS: [&str; 5] = [
    "ORACLE_HISTORY_LIMIT",
    "ORACLE_MEMORY_THRESHOLD",
    "ORACLE_MEMORY_REFERENCE_PROBABILITY",
    "ORACLE_RNG_SEED",
    "ORACLE_THINKING_DELAY_SCALE",
];

#[cfg(test)]
mod env_tests {
    use super::*;

    #[test]
    fn test_defaults_without_variables() {
        temp_env::with_vars_unset(KEYS, || {
            let config = EngineConfig::from_env().expect("defaults are valid");
            assert_eq!(config.history_limit, 50);
            assert_eq!(config.memory_threshold, 70.0);
            assert_eq!(config.rng_seed, None);
        });
    }

    #[test]
    fn test_overrides_from_variables() {
        temp_env::with_vars(
            [
                ("ORACLE_HISTORY_LIMIT", Some("10")),
                ("ORACLE_RNG_SEED", Some("99")),
                ("ORACLE_THINKING_DELAY_SCALE", Some("0")),
            ],
            || {
                let config = EngineConfig::from_env().expect("valid overrides");
                assert_eq!(config.history_limit, 10);
                assert_eq!(config.rng_seed, Some(99));
                assert_eq!(config.thinking_delay_scale, 0.0);
            },
        );
    }

    #[test]
    fn test_unparsable_value() {
        temp_env::with_var("ORACLE_HISTORY_LIMIT", Some("lots"), || {
            match EngineConfig::from_env() {
                Err(AppError::Config(msg)) => assert!(msg.contains("ORACLE_HISTORY_LIMIT")),
                other => panic!("Expected Config error, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_out_of_range_value() {
        temp_env::with_var("ORACLE_MEMORY_REFERENCE_PROBABILITY", Some("1.5"), || {
            assert!(matches!(
                EngineConfig::from_env(),
                Err(AppError::Validation(_))
            ));
        });
    }

    #[test]
    fn test_nan_value_rejected() {
        for key in ["ORACLE_MEMORY_REFERENCE_PROBABILITY", "ORACLE_MEMORY_THRESHOLD"] {
            temp_env::with_var(key, Some("NaN"), || {
                assert!(
                    matches!(EngineConfig::from_env(), Err(AppError::Validation(_))),
                    "{} accepted NaN",
                    key
                );
            });
        }
    }
}

#[cfg(test)]
mod env_file_tests {
    use super::*;

    #[test]
    fn test_loads_env_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "ORACLE_HISTORY_LIMIT=12").expect("write env file");
        writeln!(file, "ORACLE_MEMORY_THRESHOLD=65.5").expect("write env file");

        temp_env::with_vars_unset(KEYS, || {
            let config = EngineConfig::from_env_file(file.path()).expect("valid env file");
            assert_eq!(config.history_limit, 12);
            assert_eq!(config.memory_threshold, 65.5);
        });
    }

    #[test]
    fn test_process_env_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "ORACLE_HISTORY_LIMIT=12").expect("write env file");

        temp_env::with_var("ORACLE_HISTORY_LIMIT", Some("30"), || {
            let config = EngineConfig::from_env_file(file.path()).expect("valid env file");
            assert_eq!(config.history_limit, 30);
        });
    }

    #[test]
    fn test_missing_env_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.env");

        assert!(matches!(
            EngineConfig::from_env_file(&missing),
            Err(AppError::Config(_))
        ));
    }
}

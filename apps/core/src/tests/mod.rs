//! Test Module
//!
//! Themed test suites for the OracleChat engine.
//!
//! ## Test Categories
//! - `brain_tests`: Emotion, intent and topic analysis of realistic messages
//! - `context_tests`: Session state caps, memories and reset semantics
//! - `response_tests`: Reply composition, personalization and pacing
//! - `engine_tests`: The engine actor end to end
//! - `config_tests`: Environment and `.env` configuration loading

pub mod config_tests;
pub mod response_tests;

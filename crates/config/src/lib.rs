//! Configuration management for the chat behavior engine
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files (`config/default`, `config/{env}`)
//! - Environment variables (`CHAT_BEHAVIOR__` prefix, `__` separator)
//! - Runtime overrides (construct `BehaviorConfig` directly)

pub mod behavior;
pub mod constants;
pub mod settings;

pub use behavior::BehaviorConfig;
pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for chat_behavior_core::Error {
    fn from(err: ConfigError) -> Self {
        chat_behavior_core::Error::Config(err.to_string())
    }
}

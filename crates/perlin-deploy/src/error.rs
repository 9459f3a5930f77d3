//! Error types for deployment planning

use thiserror::Error;

/// Result type alias for deploy operations
pub type Result<T> = std::result::Result<T, DeployError>;

/// Errors that can occur while loading configuration or resolving a plan
#[derive(Debug, Error)]
pub enum DeployError {
    /// Derivation or address error
    #[error("Core error: {0}")]
    Core(#[from] perlin_core::CoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Config parsed but is not usable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Mnemonic source is not set or unreadable
    #[error("Mnemonic unavailable: {0}")]
    MnemonicUnavailable(String),
}

impl From<toml::ser::Error> for DeployError {
    fn from(e: toml::ser::Error) -> Self {
        DeployError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for DeployError {
    fn from(e: serde_json::Error) -> Self {
        DeployError::Serialization(e.to_string())
    }
}

// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchtscError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The watched compiler executable could not be resolved. This is the
    /// only condition that is fatal to startup; `main` maps it to a distinct
    /// exit code.
    #[error("Compiler executable not found: {compiler}")]
    CompilerNotFound { compiler: String },

    #[error("Failed to spawn compiler '{compiler}': {reason}")]
    CompilerSpawn { compiler: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WatchtscError {
    /// Process exit code for a top-level error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WatchtscError::CompilerNotFound { .. } => 2,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WatchtscError>;

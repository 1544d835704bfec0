// src/errors.rs

//! Crate-wide error type and aliases.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FireshellError {
    /// Missing or malformed task/pipeline/binding reference, bad placeholder,
    /// unknown pipeline at dispatch time, etc. Always raised before any
    /// external tool runs.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An external tool exited with a non-zero status.
    #[error("Task '{task}' failed with exit code {code}")]
    ExternalToolError { task: String, code: i32 },

    /// The file watcher could not be established.
    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FireshellError {
    /// Process exit code for this error.
    ///
    /// Tool failures propagate the tool's own exit code when it fits in a
    /// process status; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            FireshellError::ExternalToolError { code, .. } if (1..=255).contains(code) => *code,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FireshellError>;

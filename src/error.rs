//! Error types for testscope
//!
//! Configuration errors are fatal and carry enough detail to fix the problem.
//! Diff collection failures never surface here; they degrade to an empty
//! contribution inside [`crate::changes`].

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML in {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Suite \"{name}\" not found in configuration. Available suites: {}", .available.join(", "))]
    UnknownSuite {
        name: String,
        available: Vec<String>,
    },

    #[error("Invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Test runner command `{command}` failed: {reason}")]
    RunnerFailed { command: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    ArtifactWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

//! Error types for the conformance harness
//!
//! These cover problems with the harness itself (configuration, plan,
//! report output). Failures of the system under test are never errors:
//! they are recorded as failed checks.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the conformance harness
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === HTTP Client Errors ===
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // === Scenario Plan Errors ===
    #[error("Phase '{phase}' requires {artifact}, which no earlier phase produces")]
    UnsatisfiedArtifact { phase: String, artifact: String },

    #[error("Phase '{0}' appears more than once in the scenario plan")]
    DuplicatePhase(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid base URL error
    pub fn invalid_base_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an unsatisfied artifact error for a plan entry
    pub fn unsatisfied_artifact(
        phase: impl std::fmt::Display,
        artifact: impl std::fmt::Display,
    ) -> Self {
        Self::UnsatisfiedArtifact {
            phase: phase.to_string(),
            artifact: artifact.to_string(),
        }
    }
}

//! Error type for nmstate operations

use thiserror::Error;

/// Errors returned by state providers and configuration loading
#[derive(Debug, Error)]
pub enum NmstateError {
    /// Spawning or talking to nmstatectl failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A query command exited with a non-zero status
    #[error("nmstatectl failed: {0}")]
    Command(String),

    /// The desired state was rejected; the text is the provider's own message
    #[error("{0}")]
    Apply(String),

    /// YAML could not be parsed or produced
    #[error("invalid state document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("could not determine home directory")]
    NoHomeDirectory,
}

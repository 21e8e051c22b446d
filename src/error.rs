//! Error handling module for dockstrap
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Resolution failures get their own enum (`ResolveError`) because they are
//! the contract of the resolver: non-retryable, carrying enough context for
//! the caller to present an actionable message.

use thiserror::Error;

/// Resolution failures.
///
/// All variants reflect an unsupported or ambiguous environment, not a
/// transient fault: retrying with identical inputs yields the identical
/// error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No repository family could be determined from ID/ID_LIKE.
    #[error(
        "unsupported distribution (id: '{}', id_like: [{}]); pass --force to fall back to the debian repository",
        .id,
        .id_like.join(", ")
    )]
    UnsupportedDistro { id: String, id_like: Vec<String> },

    /// No release codename from any source. Always fatal, never defaulted:
    /// an empty or guessed codename silently corrupts the repository line.
    #[error(
        "could not determine a release codename for '{}' (sources tried: {}); pass --codename explicitly",
        .id,
        .sources.join(", ")
    )]
    UndeterminedCodename { id: String, sources: Vec<String> },

    /// Empty or blank architecture string supplied.
    #[error("architecture must be a non-empty string")]
    InvalidArchitecture,
}

/// Main error type for dockstrap
#[derive(Error, Debug)]
pub enum DockstrapError {
    /// IO errors (file operations, child processes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// OS identification errors (os-release missing or unreadable)
    #[error("OS identification error: {0}")]
    Facts(String),

    /// Architecture detection errors
    #[error("architecture detection error: {0}")]
    Detect(String),

    /// Repository resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dockstrap operations
pub type Result<T> = std::result::Result<T, DockstrapError>;

// Convenient error constructors
impl DockstrapError {
    /// Create an OS identification error
    pub fn facts(msg: impl Into<String>) -> Self {
        Self::Facts(msg.into())
    }

    /// Create an architecture detection error
    pub fn detect(msg: impl Into<String>) -> Self {
        Self::Detect(msg.into())
    }
}

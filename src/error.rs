//! Error types for session loading and normalization.
//!
//! Only the Session Store may fail a request. Everything the builder does after
//! a successful load is best-effort and reported through
//! [`ExtractionReport`](crate::builder::ExtractionReport) instead of an error.
//!
//! ## Error Categories
//!
//! - **Store Errors**: the store could not resolve or load a session
//! - **File Errors**: recordings or configuration could not be read
//! - **Parse Errors**: a recording or configuration file is malformed
//! - **Lookup Errors**: per-driver, telemetry and circuit lookups on a loaded session
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use paddock::PaddockError;
//!
//! let error = PaddockError::store_failed("cache directory is locked");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::SessionRequest;

/// Result type alias for paddock operations.
pub type Result<T, E = PaddockError> = std::result::Result<T, E>;

/// Main error type for session loading.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PaddockError {
    #[error("Session store failed: {reason}")]
    Store {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No recorded session for {request}")]
    SessionNotFound { request: SessionRequest },

    #[error("Recording file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Session data '{stream}' was not loaded")]
    NotLoaded { stream: String },

    #[error("Driver '{number}' not found in session")]
    DriverNotFound { number: String },

    #[error("Cannot compare driver '{abbreviation}' with itself")]
    SameDriverComparison { abbreviation: String },

    #[error("No car data for driver '{number}' lap {lap}")]
    TelemetryUnavailable { number: String, lap: u32 },

    #[error("Circuit info unavailable: {reason}")]
    CircuitInfoUnavailable { reason: String },

    #[error("Unknown session type '{value}'")]
    InvalidSessionType { value: String },

    #[error("Invalid configuration: {details}")]
    Config { details: String },
}

impl PaddockError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaddockError::Store { .. } => true,
            PaddockError::File { .. } => true,
            PaddockError::SessionNotFound { .. } => false,
            PaddockError::Parse { .. } => false,
            PaddockError::NotLoaded { .. } => false,
            PaddockError::DriverNotFound { .. } => false,
            PaddockError::SameDriverComparison { .. } => false,
            PaddockError::TelemetryUnavailable { .. } => false,
            PaddockError::CircuitInfoUnavailable { .. } => false,
            PaddockError::InvalidSessionType { .. } => false,
            PaddockError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PaddockError::Store { .. } => vec![
                "Check the cache directory is readable",
                "Retry the load once the store is reachable",
                "Disable caching to force a fresh read",
            ],
            PaddockError::SessionNotFound { .. } => vec![
                "Check the year and event name against the schedule",
                "Verify the session type exists for this event weekend",
            ],
            PaddockError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            PaddockError::Parse { .. } => vec![
                "Verify the recording was written by a compatible version",
                "Check the YAML for truncated content",
            ],
            PaddockError::NotLoaded { .. } => vec![
                "Load the session with the matching load flag enabled",
            ],
            PaddockError::DriverNotFound { .. } => vec![
                "Check the driver number against the session driver list",
            ],
            PaddockError::SameDriverComparison { .. } => vec![
                "Pick a second driver different from the first",
            ],
            PaddockError::TelemetryUnavailable { .. } => vec![
                "Check the session was loaded with telemetry enabled",
                "Pick a lap that has car data recorded",
            ],
            PaddockError::CircuitInfoUnavailable { .. } => vec![
                "Circuit geometry is optional; continue without circuit length",
            ],
            PaddockError::InvalidSessionType { .. } => vec![
                "Use one of FP1, FP2, FP3, Q, S or R",
            ],
            PaddockError::Config { .. } => vec![
                "Check configuration keys and value types",
                "Fall back to the default configuration",
            ],
        }
    }

    /// Helper constructor for store failures.
    pub fn store_failed(reason: impl Into<String>) -> Self {
        PaddockError::Store { reason: reason.into(), source: None }
    }

    /// Helper constructor for store failures with source.
    pub fn store_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PaddockError::Store { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        PaddockError::File { path, source }
    }

    /// Helper constructor for streams that were not requested at load time.
    pub fn not_loaded(stream: impl Into<String>) -> Self {
        PaddockError::NotLoaded { stream: stream.into() }
    }
}

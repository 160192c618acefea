//! Keyforward Error Types
//!
//! The translator itself never fails; these cover the wire codec, the
//! backend sender and configuration handling.

use thiserror::Error;

/// Central error type for keyforward
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Failed to spawn backend: {0}")]
    Spawn(String),

    /// For external `ActionSink` implementations; `DotoolSender` recovers
    /// its own transport failures and never returns this.
    #[error("Backend transport error: {0}")]
    Transport(String),

    #[error("Malformed action line: {0}")]
    Wire(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for keyforward operations
pub type ForwardResult<T> = Result<T, ForwardError>;


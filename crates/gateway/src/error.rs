//! Error types for gateway operations.

use reqwest::StatusCode;

use crate::pointer::POINTER_LEN;

/// Errors that can occur while talking to the remote service or while
/// rewriting local files.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Network or connection failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote answered with a status outside the 2xx range
    #[error("unexpected status {0} from remote")]
    RemoteProtocol(StatusCode),

    /// Remote returned a structured error body
    #[error("remote error ({status}): {message}")]
    RemoteApplication { status: StatusCode, message: String },

    /// Local pointer file wrong length or unreadable
    #[error("malformed pointer (expected {POINTER_LEN} bytes): {0}")]
    MalformedPointer(String),

    /// Response body did not match the expected shape
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Size query found no authoritative size for the object
    #[error("no remote object for id {0}")]
    NotFound(String),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

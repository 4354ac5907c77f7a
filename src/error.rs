//! Error types for the sensegate engine
//!
//! All batch-path errors are recovered locally and surfaced as per-record
//! failure statuses; none of them abort a whole batch. The one terminal
//! condition is [`EngineError::FeedUnavailable`], which leaves the engine
//! inert but never panics the calling thread.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Resource identifier is not in the closed enumeration
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Resource has no read semantics (event-only resource)
    #[error("Resource is not readable: {0}")]
    NotReadable(String),

    /// A frame field could not be parsed as a decimal value
    #[error("Malformed frame field {field}: {value:?}")]
    MalformedFrame { field: String, value: String },

    /// The replay data source could not be opened; the feed is inert
    #[error("Replay feed unavailable: {0}")]
    FeedUnavailable(String),

    /// Writing through this engine is not supported
    #[error("Writing through the sensegate engine is not supported")]
    UnsupportedWrite,

    /// Listener registration with an incompatible declared value type
    #[error("Invalid value type for event channels: expected {expected}, got {actual}")]
    InvalidValueType { expected: String, actual: String },
}

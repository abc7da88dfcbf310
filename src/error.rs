//! Error types for Noticegate.

use thiserror::Error;

use crate::failure::Failure;

/// Root error type returned by the notify entry points.
#[derive(Error, Debug, Clone)]
pub enum NotifyError {
    /// The call did not match one of the accepted shapes
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// Local fail-fast raise when no reporting sink is available
    #[error("{0}")]
    Raised(Failure),

    /// A sink failed on the forwarding path
    #[error("Notifier error: {0}")]
    Forwarding(#[from] NotifierError),

    /// The configurator produced an invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotifyError {
    /// Returns the raised failure if this is a local raise.
    pub fn raised(&self) -> Option<&Failure> {
        match self {
            NotifyError::Raised(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Caller contract violations detected while resolving a notify call.
///
/// The messages are part of the public surface; absent values render as
/// an empty string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// An error subject was paired with a secondary argument that is not a map
    #[error("option_or_error_message must be nil or Hash-like object, but got {got}")]
    NotHashLike { got: String },

    /// A label subject was paired with a missing or non-textual message
    #[error("option_or_error_message must be String-like object, but got {got}")]
    NotStringLike { got: String },

    /// A label subject was combined with `error_class`/`error_message` options
    #[error(
        "error_class must be nil but got {error_class}, error_message must be nil but got {error_message}"
    )]
    ConflictingLabel {
        error_class: String,
        error_message: String,
    },

    /// The subject is neither an error nor text
    #[error("Invalid argument")]
    InvalidArgument,

    /// An attribute key outside the recognized set
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),

    /// A recognized attribute key holding a value of the wrong type
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Errors raised by a [`Notifier`](crate::Notifier) while delivering a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifierError {
    /// The sink refused the payload (e.g. a full buffer)
    #[error("Payload rejected by {0}")]
    Rejected(String),

    /// The sink can no longer accept payloads
    #[error("Notifier unavailable: {0}")]
    Unavailable(String),

    /// The sink does not support the requested operation
    #[error("Notifier does not support: {0}")]
    NotSupported(String),

    /// Delivery failed
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl From<String> for NotifierError {
    fn from(msg: String) -> Self {
        NotifierError::Delivery(msg)
    }
}

impl From<&str> for NotifierError {
    fn from(msg: &str) -> Self {
        NotifierError::Delivery(msg.to_string())
    }
}

/// Result type alias for the notify entry points.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Result type alias for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Result type alias for argument resolution.
pub type ArgumentResult<T> = Result<T, ArgumentError>;

use thiserror::Error;

use crate::Kind;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported flag type \"{0}\"")]
    UnsupportedKind(String),

    #[error("invalid duration \"{0}\"")]
    InvalidDuration(String),

    #[error("negative duration \"{0}\" is not supported")]
    NegativeDuration(String),

    #[error("invalid timestamp \"{text}\": {reason}")]
    InvalidTimestamp { text: String, reason: String },

    #[error("invalid {kind} value \"{text}\"")]
    InvalidValue { kind: Kind, text: String },

    #[error("invalid environment \"{name}\" (expected one of: {expected})")]
    InvalidEnvironment { name: String, expected: String },

    #[error("at least one environment is required")]
    NoEnvironments,

    #[error("required flag \"{0}\" is not set")]
    MissingRequired(String),
}

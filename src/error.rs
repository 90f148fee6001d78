//! Error types for the onboarding wizard.

use crate::wizard::model::Field;
use crate::wizard::state::SubStep;

/// Top-level error type for the wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Field-level validation failures.
///
/// These are always recoverable: the message is shown under the offending
/// field and the wizard stays where it is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{message}")]
    MissingField { field: Field, message: String },

    #[error("{message}")]
    InvalidCharacters { field: Field, message: String },

    #[error("{message}")]
    InvalidPhoneNumber { field: Field, message: String },
}

impl ValidationError {
    /// The field this failure belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidCharacters { field, .. }
            | Self::InvalidPhoneNumber { field, .. } => *field,
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::MissingField { message, .. }
            | Self::InvalidCharacters { message, .. }
            | Self::InvalidPhoneNumber { message, .. } => message,
        }
    }
}

/// Rejected wizard position changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: SubStep, to: SubStep },

    #[error("Cannot enter {target}: {reason}")]
    Guard { target: SubStep, reason: String },

    #[error("Value {value} is not a valid {kind}")]
    OutOfRange { kind: &'static str, value: u8 },
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;

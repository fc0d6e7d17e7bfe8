use std::fmt;

use thiserror::Error;

/// Why a field failed structural validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationReason {
    /// The field is required but was missing or empty.
    Required,
    /// The value is not a member of the declared set.
    NotInEnum { allowed: Vec<String> },
    /// The value has the wrong shape (e.g., a malformed identifier).
    Malformed { expected: String },
}

impl ValidationReason {
    /// Short machine-readable tag used in API error bodies.
    pub fn tag(&self) -> &'static str {
        match self {
            ValidationReason::Required => "required",
            ValidationReason::NotInEnum { .. } => "not_in_enum",
            ValidationReason::Malformed { .. } => "malformed",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Required => write!(f, "required"),
            ValidationReason::NotInEnum { allowed } => {
                write!(f, "must be one of [{}]", allowed.join(", "))
            }
            ValidationReason::Malformed { expected } => write!(f, "expected {}", expected),
        }
    }
}

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid field '{field}': {reason}")]
    Validation {
        field: String,
        reason: ValidationReason,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("store unreachable: {0}")]
    Connection(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn required(field: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: ValidationReason::Required,
        }
    }

    pub fn not_in_enum(field: &str, allowed: &[&str]) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: ValidationReason::NotInEnum {
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn malformed(field: &str, expected: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: ValidationReason::Malformed {
                expected: expected.to_string(),
            },
        }
    }
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Classify driver errors: an unreachable deployment surfaces as a
/// connection failure (503), everything else as a store failure (500).
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                AppError::Connection(err.to_string())
            }
            _ => AppError::Store(err.to_string()),
        }
    }
}

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Why a user action was refused. None of these are fatal; control always
/// goes back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    MissingSelection(&'static str),
    #[error("{0} already in progress")]
    Busy(&'static str),
    #[error("{0}")]
    InvalidState(String),
    #[error("unknown {what}: {value}")]
    UnknownOption { what: &'static str, value: String },
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ActionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::MissingSelection(_) => "missing_selection",
            Self::Busy(_) => "busy",
            Self::InvalidState(_) => "invalid_state",
            Self::UnknownOption { .. } => "bad_params",
            Self::Storage(_) => "storage_failed",
        }
    }

    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

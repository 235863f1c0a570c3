use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation error attached to a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldError<E> {
    /// A required value was left blank.
    MustNotBeBlank,
    /// Application-defined error.
    Custom(E),
}

impl<E> FieldError<E> {
    /// Maps the application-defined error.
    pub fn map<F>(self, f: impl FnOnce(E) -> F) -> FieldError<F> {
        match self {
            FieldError::MustNotBeBlank => FieldError::MustNotBeBlank,
            FieldError::Custom(e) => FieldError::Custom(f(e)),
        }
    }

    pub fn custom(&self) -> Option<&E> {
        match self {
            FieldError::Custom(e) => Some(e),
            FieldError::MustNotBeBlank => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for FieldError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldError::MustNotBeBlank => f.write_str("must not be blank"),
            FieldError::Custom(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Errors returned when reading a form state from text.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed form state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("form state must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

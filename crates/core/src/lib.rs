//! Shared primitives for all Rust crates in the record step component.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across record step crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Fault categories raised while processing one invocation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invocation input is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested action is outside the supported set.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Remote table call failed or returned an unusable response.
    #[error("remote error: {0}")]
    Remote(String),

    /// Anything else.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Returns a stable label for the fault category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UnknownAction(_) => "unknown_action",
            Self::NotFound(_) => "not_found",
            Self::Remote(_) => "remote",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

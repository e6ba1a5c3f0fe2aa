//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type for every fallible boundary of the calculator:
/// catalog loading, snapshot persistence, and stage transitions.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (file names, ids, causes)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up a detail entry
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    // ==================== Convenience constructors ====================

    /// Create an invalid restaurant error
    pub fn invalid_restaurant(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRestaurant, msg).with_detail("restaurant", id.into())
    }

    /// Create a restaurant not found error
    pub fn restaurant_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {} not found", id),
        )
        .with_detail("restaurant", id)
    }

    /// Create a catalog load error for a single file
    pub fn catalog_load(file: impl Into<String>, cause: impl Into<String>) -> Self {
        let file = file.into();
        Self::with_message(
            ErrorCode::CatalogLoadFailed,
            format!("Failed to load {}: {}", file, cause.into()),
        )
        .with_detail("file", file)
    }

    /// Create an invalid stage transition error
    pub fn invalid_stage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidStage, msg)
    }

    /// Create a filesystem error
    pub fn io(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::IoError, msg)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, err.to_string())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

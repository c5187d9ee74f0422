// ABOUTME: Unified error types for the nutrition scoring and dietary compatibility engine
// ABOUTME: Defines ErrorCode, AppError with optional details and source chaining, and AppResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible engine operation returns [`AppResult`]. Callers that score a
//! single meal or check a single recipe see these errors directly; the batch
//! aggregator captures them per recipe instead of propagating them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation (negative nutrient, blank ingredient name, ...)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field was absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A numeric value fell outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resources (4000-4999)
    /// A required resource (e.g. a dietary profile) was not found
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Evaluation of a single item failed
    #[serde(rename = "PROCESSING_FAILED")]
    ProcessingFailed = 4500,
    /// The caller-supplied time budget expired before the item was evaluated
    #[serde(rename = "PROCESSING_TIMEOUT")]
    ProcessingTimeout = 4501,

    // Configuration (6000-6999)
    /// Configuration failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data could not be serialized or deserialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ProcessingFailed => "The item could not be processed",
            Self::ProcessingTimeout => "The processing time budget was exhausted",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error was caused by the caller's input rather than the engine
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredField
                | Self::ValueOutOfRange
                | Self::ResourceNotFound
        )
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details (field names, offending values)
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            source: None,
        }
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    /// Value out of range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// No dietary profile exists for the user.
    ///
    /// Kept distinct from an empty profile so that an unknown user is never
    /// treated as having no restrictions.
    #[must_use]
    pub fn profile_unavailable(user_id: Uuid) -> Self {
        Self::not_found(format!("Dietary profile for user {user_id}"))
            .with_details(serde_json::json!({ "user_id": user_id }))
    }

    /// Single-item processing failure
    pub fn processing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessingFailed, message)
    }

    /// Time budget exhausted before the item was evaluated
    #[must_use]
    pub fn processing_timeout() -> Self {
        Self::new(ErrorCode::ProcessingTimeout, "processing timeout")
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_unavailable_is_not_found() {
        let user_id = Uuid::new_v4();
        let error = AppError::profile_unavailable(user_id);

        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert!(error.message.contains(&user_id.to_string()));
        assert!(error.code.is_client_error());
    }

    #[test]
    fn test_error_display_includes_description() {
        let error = AppError::invalid_input("sodium_mg must be non-negative");
        let rendered = error.to_string();

        assert!(rendered.starts_with("The provided input is invalid"));
        assert!(rendered.contains("sodium_mg"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ProcessingTimeout).unwrap();
        assert_eq!(json, "\"PROCESSING_TIMEOUT\"");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_error = serde_json::from_str::<Value>("{not json").unwrap_err();
        let error = AppError::from(parse_error);

        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(StdError::source(&error).is_some());
    }
}

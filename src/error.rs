//! API Error Types
//!
//! Errors produced while talking to the admin REST API, and their mapping to
//! the messages shown in the UI banners. Shared by the native client and the
//! browser UI, so nothing here depends on a particular HTTP stack.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{FieldError, ValidationErrorBody};

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No structured response: connection refused, timeout, CORS, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status without validation details
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Structured validation errors (registration)
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<FieldError>),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// Session token could not be read or written
    #[error("Session storage error: {0}")]
    Session(String),
}

/// The user action an error happened in; selects the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Dashboard,
    Register,
    Deactivate,
    Checkout,
    Report,
}

impl ErrorContext {
    /// Message shown when the failure carries nothing more specific
    pub fn generic_message(self) -> &'static str {
        match self {
            ErrorContext::Dashboard => "An error occurred.",
            ErrorContext::Register => {
                "An error occurred during registration. Please try again later."
            }
            ErrorContext::Deactivate => "Unable to deactivate the user. Please try again.",
            ErrorContext::Checkout => "Unable to check out active users. Please try again.",
            ErrorContext::Report => "Unable to generate the weekly report. Please try again.",
        }
    }
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// A body of the form `{ "errors": [...] }` becomes [`ApiError::Validation`];
    /// otherwise the first of `msg`, `message` or `error` is used as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<ValidationErrorBody>(body) {
            if !parsed.errors.is_empty() {
                return ApiError::Validation(parsed.errors);
            }
        }

        #[derive(Deserialize)]
        struct MessageBody {
            msg: Option<String>,
            message: Option<String>,
            error: Option<String>,
        }

        let message = serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|b| b.msg.or(b.message).or(b.error))
            .unwrap_or_default();

        ApiError::Status { status, message }
    }

    /// True when the request never produced a structured response
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Banner lines for this error in the given context.
    ///
    /// The dashboard always shows its generic message. Other actions surface
    /// server-provided messages and fall back to the generic one.
    pub fn banner(&self, context: ErrorContext) -> Vec<String> {
        let generic = || vec![context.generic_message().to_string()];

        if context == ErrorContext::Dashboard {
            return generic();
        }

        match self {
            ApiError::Validation(errors) if !errors.is_empty() => {
                errors.iter().map(|e| e.msg.clone()).collect()
            }
            ApiError::Status { message, .. } if !message.trim().is_empty() => {
                vec![message.clone()]
            }
            _ => generic(),
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.msg.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

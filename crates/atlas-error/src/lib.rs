//! Unified error taxonomy for Atlas.
//!
//! Every fallible operation in the workspace returns `Result<T, AtlasError>`.
//! `AtlasError` carries a stable, wire-serializable [`ErrorCode`] so that the
//! daemon (the only place allowed to know about transport codes) can map it
//! to an HTTP status with a single `match`, never by inspecting a message
//! string.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Machine-readable, stable error code.
///
/// Serializes to the exact lower_snake_case token used in the wire error
/// body (`{"error": <code>, "detail": <message>}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing or invalid API credentials.
    AuthFailure,
    /// Payload shape or decoding failure.
    ValidationFailure,
    /// A state or transition references a parent that does not exist.
    ReferentialIntegrity,
    /// Read target (context/state/transition/workflow) absent.
    NotFound,
    /// A configured capacity bound was exceeded.
    CapacityExceeded,
    /// Write conflicts with an existing entity (e.g. overwrite=false).
    Conflict,
    /// Unexpected internal failure.
    Internal,
}

impl ErrorCode {
    /// Stable `&'static str` representation, e.g. `"referential_integrity"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthFailure => "auth_failure",
            Self::ValidationFailure => "validation_failure",
            Self::ReferentialIntegrity => "referential_integrity",
            Self::NotFound => "not_found",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified Atlas error.
///
/// Carries a stable [`ErrorCode`] and a human-readable message. The message
/// is always safe to return over the wire — internal failures get a generic
/// message rather than a propagated debug representation (no stack traces
/// leave the process).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    /// See [`ErrorCode::AuthFailure`].
    #[error("{0}")]
    AuthFailure(String),
    /// See [`ErrorCode::ValidationFailure`].
    #[error("{0}")]
    ValidationFailure(String),
    /// See [`ErrorCode::ReferentialIntegrity`].
    #[error("{0}")]
    ReferentialIntegrity(String),
    /// See [`ErrorCode::NotFound`].
    #[error("{0}")]
    NotFound(String),
    /// See [`ErrorCode::CapacityExceeded`].
    #[error("{0}")]
    CapacityExceeded(String),
    /// See [`ErrorCode::Conflict`].
    #[error("{0}")]
    Conflict(String),
    /// See [`ErrorCode::Internal`].
    #[error("{0}")]
    Internal(String),
}

impl AtlasError {
    /// Construct an [`ErrorCode::AuthFailure`] error.
    pub fn auth_failure(message: impl Into<String>) -> Self {
        Self::AuthFailure(message.into())
    }

    /// Construct an [`ErrorCode::ValidationFailure`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailure(message.into())
    }

    /// Construct an [`ErrorCode::ReferentialIntegrity`] error.
    pub fn referential(message: impl Into<String>) -> Self {
        Self::ReferentialIntegrity(message.into())
    }

    /// Construct an [`ErrorCode::NotFound`] error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Construct an [`ErrorCode::CapacityExceeded`] error.
    pub fn capacity_exceeded(message: impl Into<String>) -> Self {
        Self::CapacityExceeded(message.into())
    }

    /// Construct an [`ErrorCode::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Construct an [`ErrorCode::Internal`] error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The wire-stable [`ErrorCode`] for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AuthFailure(_) => ErrorCode::AuthFailure,
            Self::ValidationFailure(_) => ErrorCode::ValidationFailure,
            Self::ReferentialIntegrity(_) => ErrorCode::ReferentialIntegrity,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::CapacityExceeded(_) => ErrorCode::CapacityExceeded,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// The human-readable detail message, safe to return over the wire.
    pub fn detail(&self) -> &str {
        match self {
            Self::AuthFailure(m)
            | Self::ValidationFailure(m)
            | Self::ReferentialIntegrity(m)
            | Self::NotFound(m)
            | Self::CapacityExceeded(m)
            | Self::Conflict(m)
            | Self::Internal(m) => m,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type AtlasResult<T> = Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_matches_constructor() {
        assert_eq!(AtlasError::auth_failure("x").code(), ErrorCode::AuthFailure);
        assert_eq!(
            AtlasError::validation("x").code(),
            ErrorCode::ValidationFailure
        );
        assert_eq!(
            AtlasError::referential("x").code(),
            ErrorCode::ReferentialIntegrity
        );
        assert_eq!(AtlasError::not_found("x").code(), ErrorCode::NotFound);
        assert_eq!(
            AtlasError::capacity_exceeded("x").code(),
            ErrorCode::CapacityExceeded
        );
        assert_eq!(AtlasError::conflict("x").code(), ErrorCode::Conflict);
        assert_eq!(AtlasError::internal("x").code(), ErrorCode::Internal);
    }

    #[test]
    fn code_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCode::ReferentialIntegrity).unwrap();
        assert_eq!(json, r#""referential_integrity""#);
    }

    #[test]
    fn detail_is_message() {
        let err = AtlasError::not_found("context 'ctx1' not found");
        assert_eq!(err.detail(), "context 'ctx1' not found");
        assert_eq!(err.to_string(), "context 'ctx1' not found");
    }
}

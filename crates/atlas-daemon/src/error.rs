use atlas_error::{AtlasError, ErrorCode};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Wire-level error response.
///
/// Bridges [`AtlasError`] to an HTTP response: the [`ErrorCode`] picks the
/// status, and the body is always `{"error": <code>, "detail": <message>}`
/// as documented on [`AtlasError`] itself.
#[derive(Debug)]
pub struct ApiError(AtlasError);

impl From<AtlasError> for ApiError {
    fn from(err: AtlasError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Build a 404-mapping error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AtlasError::not_found(message))
    }

    /// Build a 400-mapping error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AtlasError::validation(message))
    }

    /// Build a 422-mapping error.
    pub fn referential(message: impl Into<String>) -> Self {
        Self(AtlasError::referential(message))
    }

    /// Build a 507-mapping error.
    pub fn capacity(message: impl Into<String>) -> Self {
        Self(AtlasError::capacity_exceeded(message))
    }

    /// Build a 409-mapping error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self(AtlasError::conflict(message))
    }

    /// Build a 401-mapping error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self(AtlasError::auth_failure(message))
    }

    /// Build a 500-mapping error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self(AtlasError::internal(message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code() {
            ErrorCode::AuthFailure => StatusCode::UNAUTHORIZED,
            ErrorCode::ValidationFailure => StatusCode::BAD_REQUEST,
            ErrorCode::ReferentialIntegrity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::CapacityExceeded => StatusCode::INSUFFICIENT_STORAGE,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.code(),
            "detail": self.0.detail(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: ApiError = AtlasError::not_found("context 'c1' not found").into();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn referential_maps_to_422() {
        let err: ApiError = AtlasError::referential("missing parent").into();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err: ApiError = AtlasError::conflict("already exists").into();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}

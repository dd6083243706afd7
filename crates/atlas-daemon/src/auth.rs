//! API-key authentication for the Atlas daemon.
//!
//! Deliberately minimal: one shared header name, a flat key-to-principal
//! map, no key rotation or RBAC. Suitable for single-tenant deployments
//! where keys are provisioned via configuration.

use crate::AppState;
use atlas_error::AtlasError;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::collections::BTreeMap;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Logical identifier for this caller (not necessarily the API key
    /// itself).
    pub id: String,
}

/// API-key authentication configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Accepted API keys, mapped to the principal they authenticate as.
    pub api_keys: BTreeMap<String, Principal>,
    /// Header name to read the API key from. Matched case-insensitively.
    pub header_name: String,
    /// When `true`, a request with no credentials is treated as
    /// unauthenticated (`None`) rather than rejected. A present-but-unknown
    /// key is always rejected regardless of this flag.
    pub optional: bool,
}

impl AuthConfig {
    /// Build a config requiring exactly the given API keys, using the
    /// default `X-API-Key` header.
    pub fn new(api_keys: BTreeMap<String, Principal>) -> Self {
        Self {
            api_keys,
            header_name: "x-api-key".to_string(),
            optional: false,
        }
    }
}

/// Validates API keys against a configured set of principals.
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Construct an authenticator from the given configuration.
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Authenticate a request's headers.
    ///
    /// Returns `Ok(None)` when no key is present and auth is optional.
    /// Returns [`AtlasError::auth_failure`] when a key is present but not
    /// recognized, or when no key is present and auth is required.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Option<Principal>, AtlasError> {
        let key = self.extract_api_key(headers);

        let Some(key) = key else {
            return if self.config.optional {
                Ok(None)
            } else {
                Err(AtlasError::auth_failure("missing API key"))
            };
        };

        self.config
            .api_keys
            .get(&key)
            .cloned()
            .map(Some)
            .ok_or_else(|| AtlasError::auth_failure("invalid API key"))
    }

    fn extract_api_key(&self, headers: &HeaderMap) -> Option<String> {
        let target = self.config.header_name.to_lowercase();
        headers.iter().find_map(|(name, value)| {
            if name.as_str().to_lowercase() != target {
                return None;
            }
            let value = value.to_str().ok()?.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    }
}

/// Axum middleware that authenticates every request against the
/// daemon-wide [`Authenticator`], if one is configured.
///
/// When no authenticator is configured, every request passes through as
/// authenticated (matches the "auth is opt-in at the daemon level" rule:
/// once configured, it applies to all routes uniformly).
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, crate::ApiError> {
    if let Some(authenticator) = state.authenticator() {
        authenticator.authenticate(request.headers())?;
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::HeaderName::try_from(name).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    fn authenticator() -> Authenticator {
        let mut keys = BTreeMap::new();
        keys.insert(
            "secret-1".to_string(),
            Principal {
                id: "scanner".to_string(),
            },
        );
        Authenticator::new(AuthConfig::new(keys))
    }

    #[test]
    fn valid_key_authenticates() {
        let auth = authenticator();
        let principal = auth
            .authenticate(&headers_with("X-API-Key", "secret-1"))
            .unwrap()
            .unwrap();
        assert_eq!(principal.id, "scanner");
    }

    #[test]
    fn missing_key_fails_when_required() {
        let auth = authenticator();
        assert!(auth.authenticate(&HeaderMap::new()).is_err());
    }

    #[test]
    fn missing_key_is_none_when_optional() {
        let mut config = AuthConfig::new(BTreeMap::new());
        config.optional = true;
        let auth = Authenticator::new(config);
        assert_eq!(auth.authenticate(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn unknown_key_always_fails_even_when_optional() {
        let mut config = AuthConfig::new(BTreeMap::new());
        config.optional = true;
        let auth = Authenticator::new(config);
        assert!(auth
            .authenticate(&headers_with("X-API-Key", "nope"))
            .is_err());
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let auth = authenticator();
        assert!(auth
            .authenticate(&headers_with("x-api-key", "secret-1"))
            .unwrap()
            .is_some());
    }
}

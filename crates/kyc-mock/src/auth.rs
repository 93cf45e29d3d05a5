//! Bearer-key authentication for endpoints guarded by a shared secret.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::config::AuthConfig;
use crate::error::VerificationError;

/// Marker extracted once the caller presented the configured bearer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized;

/// Constant-time comparison of equal-length keys.
fn token_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Check an `Authorization` header value against the configured secret.
pub fn authorize(header_value: Option<&str>, config: &AuthConfig) -> Result<Authorized, VerificationError> {
    let Some(provided) = header_value.and_then(|value| value.strip_prefix("Bearer ")) else {
        warn!("document request rejected: missing bearer credential");
        return Err(VerificationError::Unauthorized("Unauthorized".to_string()));
    };

    match config.api_key.as_deref() {
        Some(expected) if token_matches(provided, expected) => Ok(Authorized),
        Some(_) => {
            warn!("document request rejected: bearer key mismatch");
            Err(VerificationError::Unauthorized("Invalid API key".to_string()))
        }
        None => {
            warn!("document request rejected: no API key configured");
            Err(VerificationError::Unauthorized("Invalid API key".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
    AuthConfig: FromRef<S>,
{
    type Rejection = VerificationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        authorize(header_value, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> AuthConfig {
        AuthConfig {
            api_key: key.map(str::to_string),
        }
    }

    #[test]
    fn accepts_matching_bearer_key() {
        assert_eq!(
            authorize(Some("Bearer s3cret"), &config(Some("s3cret"))),
            Ok(Authorized)
        );
    }

    #[test]
    fn distinguishes_missing_from_invalid_credentials() {
        let expected = config(Some("s3cret"));
        assert_eq!(
            authorize(None, &expected),
            Err(VerificationError::Unauthorized("Unauthorized".to_string()))
        );
        assert_eq!(
            authorize(Some("Basic s3cret"), &expected),
            Err(VerificationError::Unauthorized("Unauthorized".to_string()))
        );
        assert_eq!(
            authorize(Some("Bearer s3cre"), &expected),
            Err(VerificationError::Unauthorized("Invalid API key".to_string()))
        );
    }

    #[test]
    fn rejects_everything_without_configured_key() {
        assert!(authorize(Some("Bearer anything"), &config(None)).is_err());
        assert!(authorize(Some("Bearer "), &config(None)).is_err());
    }
}

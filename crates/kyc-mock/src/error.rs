use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Failures raised while booting or running a component process.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Verification(VerificationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Verification(err) => write!(f, "verification error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Verification(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Verification(err) => err.into_response(),
            other => {
                let body = Json(json!({ "error": other.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<VerificationError> for AppError {
    fn from(value: VerificationError) -> Self {
        Self::Verification(value)
    }
}

/// Request-level failures shared by the verification endpoints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// Missing or malformed request fields.
    #[error("{message}")]
    Validation {
        message: String,
        required: Vec<&'static str>,
    },
    #[error("{0}")]
    Unauthorized(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Internal(String),
}

impl VerificationError {
    /// The canonical rejection for a payload lacking any of `required`.
    pub fn missing_fields(required: &[&'static str]) -> Self {
        Self::Validation {
            message: "Missing required fields".to_string(),
            required: required.to_vec(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            required: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            VerificationError::Validation { .. } => StatusCode::BAD_REQUEST,
            VerificationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            VerificationError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            VerificationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            VerificationError::Validation { message, required } if !required.is_empty() => {
                json!({ "error": message, "required": required })
            }
            VerificationError::Internal(details) => {
                json!({ "error": "Internal server error", "details": details })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Route fallback for verbs a verification endpoint does not serve.
pub async fn method_not_allowed() -> VerificationError {
    VerificationError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: VerificationError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn missing_fields_lists_required_names() {
        let (status, body) =
            body_of(VerificationError::missing_fields(&["user_address", "document_id"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(body["required"], json!(["user_address", "document_id"]));
    }

    #[tokio::test]
    async fn internal_errors_attach_details() {
        let (status, body) = body_of(VerificationError::Internal("boom".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["details"], "boom");
    }

    #[tokio::test]
    async fn method_not_allowed_maps_to_405() {
        let (status, body) = body_of(VerificationError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn listener_failures_surface_as_io_errors() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address already in use",
        ));
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "io error: address already in use");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Request extractors that turn loosely-shaped JSON bodies into typed requests.
//!
//! Handlers never see a raw payload: the body is decoded into the payload's
//! `Raw` form and then validated, so a missing or malformed field is rejected
//! with [`VerificationError::Validation`] before dispatch.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::VerificationError;

/// Strongly-typed request built from a JSON body.
pub trait ValidatedPayload: Sized {
    type Raw: DeserializeOwned + Send;

    fn validate(raw: Self::Raw) -> Result<Self, VerificationError>;

    /// Rejection used when the body cannot be decoded at all.
    fn rejected(rejection: JsonRejection) -> VerificationError {
        VerificationError::invalid(rejection.body_text())
    }
}

/// JSON body extractor that validates into `T` before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: ValidatedPayload,
{
    type Rejection = VerificationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T::Raw>::from_request(req, state)
            .await
            .map_err(T::rejected)?;
        T::validate(raw).map(ValidatedJson)
    }
}

/// A field counts as present only when it carries a non-empty string.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_absent() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some(" ".to_string())), Some(" ".to_string()));
    }
}

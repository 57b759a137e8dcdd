//! JSON body extractor that reports failures in the API error envelope.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decodes the request body as JSON whatever `Content-Type` the client sent.
///
/// Unlike [`axum::Json`] the header is not checked, so `curl -d '{...}'`
/// (which sends `application/x-www-form-urlencoded`) is accepted. A
/// malformed, mistyped or incomplete body is rejected with
/// [`ApiError::Validation`] (400).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!(error = %rejection.body_text(), "unable to read request body");
            ApiError::from(rejection)
        })?;
        let value = serde_json::from_slice(&body).map_err(|err| {
            tracing::warn!(error = %err, "rejected request body");
            ApiError::from(err)
        })?;
        Ok(Self(value))
    }
}

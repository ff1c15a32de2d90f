//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// JSON extractor that validates the payload before the handler runs.
///
/// Malformed bodies and failed field rules both reject with
/// `AppError::Validation` (HTTP 400).
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_failure(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Message for the alphabetically first failing field, so the same payload
/// always yields the same message.
fn first_failure(errors: &ValidationErrors) -> String {
    let Some((field, failures)) = errors
        .field_errors()
        .into_iter()
        .min_by(|(a, _), (b, _)| a.cmp(b))
    else {
        return "Invalid request body".to_string();
    };

    failures
        .first()
        .and_then(|failure| failure.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| format!("Invalid value for {}", field))
}

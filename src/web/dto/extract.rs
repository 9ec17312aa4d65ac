//! Request body extraction.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

/// A JSON extractor that reports malformed bodies as API errors.
///
/// Unlike `axum::Json`, a rejection (bad syntax, wrong content type) produces
/// the same JSON error shape as every other client error.
///
/// # Example
///
/// ```ignore
/// use contact_relay::web::dto::JsonBody;
///
/// async fn submit(JsonBody(payload): JsonBody<serde_json::Value>) {
///     // payload is well-formed JSON, not yet validated
/// }
/// ```
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        Ok(JsonBody(value))
    }
}

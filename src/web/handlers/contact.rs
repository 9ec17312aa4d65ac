//! Contact form handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::contact::Outcome;
use crate::web::dto::{ContactRequest, JsonBody, SubmitResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/contact/submit - Relay a contact application to the admin mailbox.
#[utoipa::path(
    post,
    path = "/api/contact/submit",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Application sent", body = SubmitResponse),
        (status = 400, description = "Malformed body or invalid fields"),
        (status = 429, description = "Too many submissions"),
        (status = 500, description = "Application could not be delivered", body = SubmitResponse)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    match state.contact.handle(&payload).await {
        Ok(Outcome::Success { message }) => Ok((StatusCode::OK, Json(SubmitResponse::sent(message)))),
        Ok(Outcome::Failure { reason }) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SubmitResponse::failed(reason)),
        )),
        Err(errors) => Err(ApiError::from_validation_errors(errors)),
    }
}

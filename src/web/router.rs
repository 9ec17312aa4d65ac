//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::dto::{ContactRequest, SubmitResponse};
use super::handlers::{submit_contact, AppState};
use super::middleware::{
    api_rate_limit, create_cors_layer, security_headers, submit_rate_limit, RateLimitState,
};

/// OpenAPI document for the public API.
#[derive(OpenApi)]
#[openapi(
    paths(super::handlers::contact::submit_contact),
    components(schemas(ContactRequest, SubmitResponse)),
    tags((name = "contact", description = "Contact form relay"))
)]
pub struct ApiDoc;

/// Create the main API router.
///
/// `POST /api/contact/submit` is guarded by the submit limit only; every
/// other route shares the default limit.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limit: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    let submit_state = rate_limit.clone();
    let contact_routes = Router::new()
        .route("/submit", post(submit_contact))
        .route_layer(middleware::from_fn(move |req, next| {
            let state = submit_state.clone();
            submit_rate_limit(state, req, next)
        }));

    let api_routes = Router::new().nest("/contact", contact_routes);

    let default_routes = create_health_router()
        .merge(create_openapi_router())
        .route_layer(middleware::from_fn(move |req, next| {
            let state = rate_limit.clone();
            api_rate_limit(state, req, next)
        }));

    Router::new()
        .nest("/api", api_routes)
        .with_state(app_state)
        .merge(default_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the router serving the OpenAPI document.
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

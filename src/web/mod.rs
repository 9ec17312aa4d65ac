//! Web API module.
//!
//! Exposes the contact relay over HTTP with per-client rate limiting.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;

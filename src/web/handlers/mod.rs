//! API handlers.

pub mod contact;

pub use contact::*;

use crate::contact::ContactService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Contact submission service.
    pub contact: ContactService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(contact: ContactService) -> Self {
        Self { contact }
    }
}

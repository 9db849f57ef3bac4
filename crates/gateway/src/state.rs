//! Application state for dependency injection.

use gelato_service_lib::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

use std::sync::Arc;

use mapsync_core::{IdentityVerifier, TripPlanner};

/// Shared handles for request handlers, built once at startup.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<dyn TripPlanner>,
    identity: Arc<dyn IdentityVerifier>,
    demo_login: bool,
}

impl AppState {
    pub fn new(planner: Arc<dyn TripPlanner>, identity: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            planner,
            identity,
            demo_login: false,
        }
    }

    /// Accepts the built-in demo credentials on `/login`.
    pub fn with_demo_login(mut self, enabled: bool) -> Self {
        self.demo_login = enabled;
        self
    }

    pub fn planner(&self) -> &dyn TripPlanner {
        self.planner.as_ref()
    }

    pub fn identity(&self) -> &dyn IdentityVerifier {
        self.identity.as_ref()
    }

    pub fn demo_login(&self) -> bool {
        self.demo_login
    }
}

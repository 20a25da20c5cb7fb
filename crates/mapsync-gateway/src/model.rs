mod auth;
mod health;
mod sync;
mod trip;

pub use auth::{LoginRequest, UserResponse, VerifyTokenRequest};
pub use health::HealthResponse;
pub use sync::{RouteSummary, RoutesQuery, RoutesResponse, SyncRequest, SyncResponse};
pub use trip::{CreateTripRequest, CreateTripResponse, TripResponse, TripsResponse};

/// Value of the `status` field in successful responses.
pub const STATUS_SUCCESS: &str = "success";

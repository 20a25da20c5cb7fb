mod auth;
mod health;
mod sync;
mod trip;

pub use auth::{login_handler, verify_token_handler};
pub use health::{health_handler, home_handler};
pub use sync::{routes_handler, sync_handler};
pub use trip::{create_trip_handler, get_trip_handler, join_trip_handler, user_trips_handler};

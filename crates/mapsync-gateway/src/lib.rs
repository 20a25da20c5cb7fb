//! HTTP gateway for the MapSync trip service.

pub mod app;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use cors::Deployment;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_trip_handler, get_trip_handler, health_handler, home_handler, join_trip_handler,
    login_handler, routes_handler, sync_handler, user_trips_handler, verify_token_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(home_handler))
            .route("/health", get(health_handler))
            .route("/login", post(login_handler))
            .route("/auth/verify-token", post(verify_token_handler))
            .route("/newtrip", post(create_trip_handler))
            .route("/trips", post(create_trip_handler))
            .route("/trips/{code}", get(get_trip_handler))
            .route("/trips/join/{code}", post(join_trip_handler))
            .route("/trips/user/{user_id}", get(user_trips_handler))
            .route("/sync", post(sync_handler))
            .route("/routes", get(routes_handler))
            .with_state(state)
    }

    /// The router with request tracing and the given CORS policy applied.
    pub fn service(state: AppState, cors: CorsLayer) -> Router {
        Self::router(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }
}

use crate::error::{AppError, Result};
use crate::model::{RouteSummary, RoutesQuery, RoutesResponse, SyncRequest, SyncResponse};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use mapsync_core::TripRecord;

/// Accepts a client's map data. Nothing is persisted yet; the payload is
/// echoed back.
pub async fn sync_handler(
    request: std::result::Result<Json<SyncRequest>, JsonRejection>,
) -> Result<Json<SyncResponse>> {
    let Json(request) = request?;
    let (Some(user_id), Some(maps_data)) = (request.user_id, request.google_maps_data) else {
        return Err(AppError::Validation(
            "Invalid payload. 'user_id' and 'google_maps_data' required.".to_string(),
        ));
    };

    Ok(Json(SyncResponse {
        message: "Data synced successfully",
        user_id,
        maps_data,
    }))
}

/// Lists a user's trips as routes.
pub async fn routes_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<RoutesQuery>, QueryRejection>,
) -> Result<Json<RoutesResponse>> {
    let Query(query) = query?;
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("Missing 'user_id' parameter.".to_string()))?;

    let routes = state
        .planner()
        .trips_for_user(&user_id)
        .await?
        .into_iter()
        .map(route_summary)
        .collect();

    Ok(Json(RoutesResponse { user_id, routes }))
}

fn route_summary(trip: TripRecord) -> RouteSummary {
    RouteSummary {
        route_id: trip.id.to_string(),
        name: format!("{} to {}", trip.origin, trip.destination),
        stops: trip.stops.into_iter().map(|stop| stop.name).collect(),
    }
}

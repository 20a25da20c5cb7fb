use crate::error::{AppError, Result};
use crate::handlers::auth::{optional_caller, required_caller};
use crate::model::{
    CreateTripRequest, CreateTripResponse, TripResponse, TripsResponse, STATUS_SUCCESS,
};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use mapsync_core::{TripCode, ANONYMOUS_CREATOR};

pub async fn create_trip_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: std::result::Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<Json<CreateTripResponse>> {
    let Json(request) = request?;
    let caller = optional_caller(&state, &headers).await?;
    let created_by = caller
        .as_ref()
        .map_or(ANONYMOUS_CREATOR, |subject| subject.user_id());

    let params = request
        .into_params(created_by)
        .map_err(AppError::Validation)?;
    let created = state.planner().create(params).await?;

    Ok(Json(CreateTripResponse {
        status: STATUS_SUCCESS,
        trip_id: created.code.to_string(),
        share_link: created.share_link,
    }))
}

pub async fn get_trip_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TripResponse>> {
    let code = TripCode::new(code).map_err(mapsync_core::PlannerError::from)?;
    let trip = state.planner().get(&code).await?;

    Ok(Json(TripResponse {
        status: STATUS_SUCCESS,
        trip,
    }))
}

pub async fn join_trip_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TripResponse>> {
    let caller = required_caller(&state, &headers).await?;
    let code = TripCode::new(code).map_err(mapsync_core::PlannerError::from)?;
    let trip = state.planner().join(&code, caller.user_id()).await?;

    Ok(Json(TripResponse {
        status: STATUS_SUCCESS,
        trip,
    }))
}

pub async fn user_trips_handler(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TripsResponse>> {
    let trips = state.planner().trips_for_user(&user_id).await?;

    Ok(Json(TripsResponse {
        status: STATUS_SUCCESS,
        trips,
    }))
}

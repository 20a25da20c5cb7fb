use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
pub struct SyncRequest {
    pub user_id: Option<String>,
    pub google_maps_data: Option<Value>,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub message: &'static str,
    pub user_id: String,
    pub maps_data: Value,
}

#[derive(Deserialize)]
pub struct RoutesQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub route_id: String,
    pub name: String,
    pub stops: Vec<String>,
}

#[derive(Serialize)]
pub struct RoutesResponse {
    pub user_id: String,
    pub routes: Vec<RouteSummary>,
}

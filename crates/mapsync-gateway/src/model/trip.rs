use mapsync_core::{TripParams, TripRecord};
use serde::{Deserialize, Serialize};

/// Body of `POST /trips`. Fields are optional so that missing ones can be
/// reported together instead of failing on the first.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTripRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub stops: Option<Vec<String>>,
}

impl CreateTripRequest {
    /// Converts into creation parameters, or names the missing fields.
    pub fn into_params(self, created_by: &str) -> Result<TripParams, String> {
        match (self.origin, self.destination, self.stops) {
            (Some(origin), Some(destination), Some(stops)) => {
                Ok(TripParams::new(origin, destination, stops).created_by(created_by))
            }
            (origin, destination, stops) => {
                let missing: Vec<&str> = [
                    ("origin", origin.is_none()),
                    ("destination", destination.is_none()),
                    ("stops", stops.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(format!("missing required fields: {}", missing.join(", ")))
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripResponse {
    pub status: &'static str,
    pub trip_id: String,
    pub share_link: String,
}

#[derive(Serialize)]
pub struct TripResponse {
    pub status: &'static str,
    pub trip: TripRecord,
}

#[derive(Serialize)]
pub struct TripsResponse {
    pub status: &'static str,
    pub trips: Vec<TripRecord>,
}

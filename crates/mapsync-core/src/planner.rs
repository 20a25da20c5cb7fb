use crate::error::PlannerError;
use crate::trip::{TripParams, TripRecord};
use crate::tripcode::TripCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, PlannerError>;

/// Outcome of a successful trip creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTrip {
    pub code: TripCode,
    /// Base path joined with the code.
    pub share_link: String,
    /// `false` when the write failed and was skipped under the best-effort policy.
    pub persisted: bool,
}

#[async_trait]
pub trait TripPlanner: Send + Sync + 'static {
    /// Creates a trip and returns its invite code and shareable link.
    async fn create(&self, params: TripParams) -> Result<CreatedTrip>;

    /// Fetches the trip stored under `code`.
    async fn get(&self, code: &TripCode) -> Result<TripRecord>;

    /// Adds `user` to the trip's participants and returns the updated trip.
    async fn join(&self, code: &TripCode, user: &str) -> Result<TripRecord>;

    /// Lists the trips `user` created or joined.
    async fn trips_for_user(&self, user: &str) -> Result<Vec<TripRecord>>;
}

use crate::tripcode::TripCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Creator recorded for trips created without a verified identity.
pub const ANONYMOUS_CREATOR: &str = "anonymous";

/// A single stop along a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Positional identifier, `stop-{index}`.
    pub id: String,
    pub name: String,
    pub address: String,
}

impl Stop {
    /// Builds the stop at position `index` from a raw place string.
    pub fn at(index: usize, place: impl Into<String>) -> Self {
        let place = place.into();
        Self {
            id: format!("stop-{index}"),
            name: place.clone(),
            address: place,
        }
    }
}

/// A stored trip document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    /// The invite code, also the store key.
    pub id: TripCode,
    pub origin: String,
    pub destination: String,
    /// Stops in the order the creator listed them.
    pub stops: Vec<Stop>,
    pub created_at: Timestamp,
    pub created_by: String,
    /// Users who joined the trip, in join order.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl TripRecord {
    /// Normalizes creation parameters into a record keyed by `code`.
    ///
    /// `created_at` is truncated to microseconds, the precision stores keep.
    pub fn build(code: TripCode, params: TripParams, created_at: Timestamp) -> Self {
        let stops = params
            .stops
            .into_iter()
            .enumerate()
            .map(|(index, place)| Stop::at(index, place))
            .collect();

        Self {
            id: code,
            origin: params.origin,
            destination: params.destination,
            stops,
            created_at: truncate_to_micros(created_at),
            created_by: params.created_by,
            participants: Vec::new(),
        }
    }

    /// Whether `user` created or joined this trip.
    pub fn involves(&self, user: &str) -> bool {
        self.created_by == user || self.participants.iter().any(|p| p == user)
    }

    /// Adds `user` to the participants. Returns `false` if already present.
    pub fn add_participant(&mut self, user: &str) -> bool {
        if self.participants.iter().any(|p| p == user) {
            return false;
        }
        self.participants.push(user.to_owned());
        true
    }
}

fn truncate_to_micros(ts: Timestamp) -> Timestamp {
    ts - SignedDuration::from_nanos(i64::from(ts.subsec_nanosecond() % 1_000))
}

/// Parameters for creating a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripParams {
    pub origin: String,
    pub destination: String,
    /// Raw stop strings; each becomes both the name and the address of a stop.
    pub stops: Vec<String>,
    pub created_by: String,
}

impl TripParams {
    /// Creates parameters for an anonymous creator.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        stops: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            stops: stops.into_iter().map(Into::into).collect(),
            created_by: ANONYMOUS_CREATOR.to_string(),
        }
    }

    pub fn created_by(mut self, creator: impl Into<String>) -> Self {
        self.created_by = creator.into();
        self
    }
}

/// What trip creation does when the store write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Log the failure and report success to the caller.
    #[default]
    BestEffort,
    /// Propagate the persistence error.
    Strict,
}

impl Display for WritePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WritePolicy::BestEffort => write!(f, "best-effort"),
            WritePolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-effort" => Ok(WritePolicy::BestEffort),
            "strict" => Ok(WritePolicy::Strict),
            other => Err(format!("unknown write policy '{other}'")),
        }
    }
}

//! Core types and traits for the MapSync backend.
//!
//! This crate provides the trip model, the invite code type and the store
//! and identity seams shared by the planner service and the HTTP gateway.

pub mod error;
pub mod identity;
pub mod planner;
pub mod repository;
pub mod trip;
pub mod tripcode;

pub use error::{AuthError, CoreError, PlannerError, StorageError};
pub use identity::{DisabledIdentityVerifier, IdentityVerifier, StaticIdentityVerifier, Subject};
pub use planner::{CreatedTrip, TripPlanner};
pub use repository::{ReadRepository, Repository};
pub use trip::{Stop, TripParams, TripRecord, WritePolicy, ANONYMOUS_CREATOR};
pub use tripcode::TripCode;

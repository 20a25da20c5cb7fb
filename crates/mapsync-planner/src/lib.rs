//! Trip planning service.
//!
//! This crate allocates invite codes and manages the trip record
//! lifecycle on top of any [`Repository`](mapsync_core::Repository).
//! Core types are re-exported from `mapsync_core`.

pub mod allocator;
pub mod service;

pub use allocator::CodeAllocator;
pub use mapsync_core::{CreatedTrip, PlannerError, TripPlanner};
pub use service::{TripService, TripServiceSettings};

/// Default bound on allocation and write attempts per trip creation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

/// Default base path for shareable trip links.
pub const DEFAULT_SHARE_BASE: &str = "/trips";

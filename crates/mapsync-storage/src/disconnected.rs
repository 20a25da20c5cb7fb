use async_trait::async_trait;
use mapsync_core::repository::{ReadRepository, Repository, Result};
use mapsync_core::{StorageError, TripCode, TripRecord};

const REASON: &str = "trip store is not configured";

/// Stand-in used when no trip store has been configured.
///
/// Every operation fails with [`StorageError::Unavailable`], so reads are
/// reported as "service unavailable" rather than "not found" and trip
/// creation runs in its degraded mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisconnectedRepository;

impl DisconnectedRepository {
    pub fn new() -> Self {
        Self
    }
}

fn unavailable<T>() -> Result<T> {
    Err(StorageError::Unavailable(REASON.to_string()))
}

#[async_trait]
impl ReadRepository for DisconnectedRepository {
    async fn get(&self, _code: &TripCode) -> Result<Option<TripRecord>> {
        unavailable()
    }

    async fn exists(&self, _code: &TripCode) -> Result<bool> {
        unavailable()
    }

    async fn list_by_user(&self, _user: &str) -> Result<Vec<TripRecord>> {
        unavailable()
    }
}

#[async_trait]
impl Repository for DisconnectedRepository {
    async fn insert(&self, _code: &TripCode, _record: TripRecord) -> Result<()> {
        unavailable()
    }

    async fn add_participant(&self, _code: &TripCode, _user: &str) -> Result<bool> {
        unavailable()
    }
}

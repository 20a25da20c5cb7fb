use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mapsync_core::repository::{ReadRepository, Repository, Result};
use mapsync_core::{StorageError, TripCode, TripRecord};
use std::cmp::Reverse;

/// In-memory implementation of the trip store using DashMap.
///
/// Inserts go through the entry API, so the existence check and the write
/// for a code happen under the same shard lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<TripCode, TripRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored trips.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &TripCode) -> Result<Option<TripRecord>> {
        Ok(self.storage.get(code).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &TripCode) -> Result<bool> {
        Ok(self.storage.contains_key(code))
    }

    async fn list_by_user(&self, user: &str) -> Result<Vec<TripRecord>> {
        let mut trips: Vec<TripRecord> = self
            .storage
            .iter()
            .filter(|entry| entry.value().involves(user))
            .map(|entry| entry.value().clone())
            .collect();
        trips.sort_by_key(|trip| (Reverse(trip.created_at), trip.id.clone()));
        Ok(trips)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &TripCode, record: TripRecord) -> Result<()> {
        match self.storage.entry(code.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn add_participant(&self, code: &TripCode, user: &str) -> Result<bool> {
        let Some(mut entry) = self.storage.get_mut(code) else {
            return Ok(false);
        };
        entry.add_participant(user);
        Ok(true)
    }
}

use crate::error::StorageError;
use crate::trip::TripRecord;
use crate::tripcode::TripCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the trip store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the trip stored under `code`.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &TripCode) -> Result<Option<TripRecord>>;

    /// Checks whether a trip code is already taken.
    async fn exists(&self, code: &TripCode) -> Result<bool>;

    /// Lists the trips `user` created or joined, newest first.
    async fn list_by_user(&self, user: &str) -> Result<Vec<TripRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new trip if the code is free.
    /// Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, code: &TripCode, record: TripRecord) -> Result<()>;

    /// Adds `user` to the participants of the trip under `code`.
    /// Returns `false` if no such trip exists. Adding an existing
    /// participant again leaves the record unchanged.
    async fn add_participant(&self, code: &TripCode, user: &str) -> Result<bool>;
}

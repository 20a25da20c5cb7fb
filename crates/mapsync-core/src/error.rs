use thiserror::Error;

/// Errors related to the core types of the trip service.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid trip code: {0}")]
    InvalidTripCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("trip code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Whether the backend could not be reached at all, as opposed to
    /// answering with a failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Timeout(_))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum PlannerError {
    #[error("invalid trip: {0}")]
    Validation(String),
    #[error("invalid trip code: {0}")]
    InvalidTripCode(String),
    #[error("trip not found: {0}")]
    NotFound(String),
    #[error("no free trip code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
    #[error("trip store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to persist trip: {0}")]
    Persistence(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for PlannerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidTripCode(message) => Self::InvalidTripCode(message),
        }
    }
}

impl From<StorageError> for PlannerError {
    fn from(value: StorageError) -> Self {
        if value.is_unavailable() {
            return Self::Unavailable(value.to_string());
        }
        Self::Storage(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_store_maps_to_unavailable() {
        let err: PlannerError = StorageError::Timeout("pool".into()).into();
        assert!(matches!(err, PlannerError::Unavailable(_)));

        let err: PlannerError = StorageError::Unavailable("down".into()).into();
        assert!(matches!(err, PlannerError::Unavailable(_)));
    }

    #[test]
    fn failed_query_maps_to_storage() {
        let err: PlannerError = StorageError::Query("syntax".into()).into();
        assert!(matches!(err, PlannerError::Storage(_)));
    }
}

use crate::allocator::CodeAllocator;
use crate::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SHARE_BASE};
use async_trait::async_trait;
use jiff::Timestamp;
use mapsync_core::{
    CreatedTrip, PlannerError, Repository, StorageError, TripCode, TripParams, TripPlanner,
    TripRecord, WritePolicy,
};
use mapsync_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// Configures a [`TripService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct TripServiceSettings {
    /// Base path or URL the invite code is appended to.
    #[builder(default = DEFAULT_SHARE_BASE.to_string(), setter(into))]
    pub share_base: String,
    /// What to do when the store write fails.
    #[builder(default)]
    pub write_policy: WritePolicy,
    /// Bound on candidate codes per allocation and on writes per creation.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for TripServiceSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`TripPlanner`] trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - Request validation
/// - Invite code allocation
/// - Stop normalization and persistence
///
/// Writes use the store's create-if-absent insert. A conflict means another
/// creator took the allocated code first, which triggers a fresh allocation.
#[derive(Debug)]
pub struct TripService<R, G> {
    repository: Arc<R>,
    allocator: CodeAllocator<R, G>,
    settings: TripServiceSettings,
}

impl<R: Repository, G: Generator> TripService<R, G> {
    /// Creates a service with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, TripServiceSettings::default())
    }

    pub fn with_settings(repository: R, generator: G, settings: TripServiceSettings) -> Self {
        let repository = Arc::new(repository);
        let allocator = CodeAllocator::new(
            Arc::clone(&repository),
            Arc::new(generator),
            settings.max_attempts,
        );

        Self {
            repository,
            allocator,
            settings,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn validate(params: &TripParams) -> Result<(), PlannerError> {
        if params.origin.trim().is_empty() {
            return Err(PlannerError::Validation(
                "origin cannot be empty".to_string(),
            ));
        }

        if params.destination.trim().is_empty() {
            return Err(PlannerError::Validation(
                "destination cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn created(&self, code: TripCode, persisted: bool) -> CreatedTrip {
        CreatedTrip {
            share_link: code.to_link(&self.settings.share_base),
            code,
            persisted,
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator> TripPlanner for TripService<R, G> {
    async fn create(&self, params: TripParams) -> Result<CreatedTrip, PlannerError> {
        Self::validate(&params)?;

        let attempts = self.allocator.max_attempts();
        for _ in 0..attempts {
            let code = self.allocator.allocate().await?;
            let record = TripRecord::build(code.clone(), params.clone(), Timestamp::now());

            match self.repository.insert(&code, record).await {
                Ok(()) => {
                    info!(code = %code, created_by = %params.created_by, "trip created");
                    return Ok(self.created(code, true));
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, "trip code claimed concurrently, reallocating");
                }
                Err(err) => match self.settings.write_policy {
                    WritePolicy::BestEffort => {
                        warn!(code = %code, error = %err, "trip write failed, continuing");
                        return Ok(self.created(code, false));
                    }
                    WritePolicy::Strict => {
                        return Err(PlannerError::Persistence(err.to_string()));
                    }
                },
            }
        }

        Err(PlannerError::CodeSpaceExhausted { attempts })
    }

    async fn get(&self, code: &TripCode) -> Result<TripRecord, PlannerError> {
        self.repository
            .get(code)
            .await?
            .ok_or_else(|| PlannerError::NotFound(code.to_string()))
    }

    async fn join(&self, code: &TripCode, user: &str) -> Result<TripRecord, PlannerError> {
        if !self.repository.add_participant(code, user).await? {
            return Err(PlannerError::NotFound(code.to_string()));
        }
        debug!(code = %code, user = %user, "user joined trip");

        self.get(code).await
    }

    async fn trips_for_user(&self, user: &str) -> Result<Vec<TripRecord>, PlannerError> {
        Ok(self.repository.list_by_user(user).await?)
    }
}

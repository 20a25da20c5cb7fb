use mapsync_core::{PlannerError, ReadRepository, TripCode};
use mapsync_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Picks invite codes that are not yet taken in the trip store.
///
/// Candidates come from a [`Generator`] and are checked with
/// [`ReadRepository::exists`]. If the store cannot answer, the current
/// candidate is returned unchecked: allocation keeps working while the
/// store is down, at the cost of uniqueness.
#[derive(Debug)]
pub struct CodeAllocator<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R, G> Clone for CodeAllocator<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R: ReadRepository, G: Generator> CodeAllocator<R, G> {
    /// Creates an allocator trying at most `max_attempts` candidates per call.
    ///
    /// A bound of zero is treated as one.
    pub fn new(repository: Arc<R>, generator: Arc<G>, max_attempts: usize) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns a code with no trip stored under it.
    ///
    /// # Returns
    ///
    /// * `Ok(code)` - A free code, or an unchecked one if the store failed
    /// * `Err(CodeSpaceExhausted)` - If every candidate was already taken
    pub async fn allocate(&self) -> Result<TripCode, PlannerError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            match self.repository.exists(&candidate).await {
                Ok(false) => {
                    debug!(code = %candidate, attempt, "allocated trip code");
                    return Ok(candidate);
                }
                Ok(true) => {
                    trace!(code = %candidate, attempt, "trip code taken, regenerating");
                }
                Err(err) => {
                    warn!(
                        code = %candidate,
                        error = %err,
                        "existence check failed, using unchecked trip code"
                    );
                    return Ok(candidate);
                }
            }
        }

        Err(PlannerError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

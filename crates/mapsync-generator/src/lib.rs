pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use mapsync_core::TripCode;

/// Trait for generating candidate trip codes.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is checked by the allocator against the trip store.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next candidate code.
    fn generate(&self) -> TripCode;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self) -> TripCode {
        (**self).generate()
    }
}

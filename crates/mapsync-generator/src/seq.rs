use crate::Generator;
use mapsync_core::tripcode::{ALPHABET, CODE_LENGTH};
use mapsync_core::TripCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// Size of the trip code space, 36^6.
pub const CODE_SPACE: u64 = 2_176_782_336;

/// A generator walking the code space in order.
///
/// Counter value `n` is written in base 36 over [`ALPHABET`], so `0` is
/// `AAAAAA`, `1` is `AAAAAB` and `35` is `AAAAA9`. The counter wraps at the
/// end of the code space. Useful where a test needs to know which code
/// comes next.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Starts the sequence at counter value `offset`.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset % CODE_SPACE),
        }
    }

    /// Encodes a counter value as a trip code.
    pub fn encode(value: u64) -> TripCode {
        let mut value = value % CODE_SPACE;
        let mut buf = [ALPHABET[0]; CODE_LENGTH];
        for slot in buf.iter_mut().rev() {
            *slot = ALPHABET[(value % 36) as usize];
            value /= 36;
        }
        TripCode::new_unchecked(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> TripCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Self::encode(count)
    }
}

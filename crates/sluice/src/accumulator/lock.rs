use super::{Accumulator, mutex::Mutex};

/// A mutex-guarded [`Accumulator`].
///
/// Uses `std::sync::Mutex` by default, or `parking_lot::Mutex` when the
/// `parking-lot` feature is enabled.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Fair under heavy contention (with `parking-lot`)
///
/// ## Recommended When
/// - The platform has no native 64-bit atomics
/// - You are comparing lock and atomic accounting in the same pipeline
///
/// ## See Also
/// - [`AtomicAccumulator`]
///
/// [`AtomicAccumulator`]: crate::accumulator::AtomicAccumulator
#[derive(Debug, Default)]
pub struct LockAccumulator {
    value: Mutex<u64>,
}

impl LockAccumulator {
    #[cfg(feature = "parking-lot")]
    fn with_value<R>(&self, f: impl FnOnce(&mut u64) -> R) -> R {
        f(&mut self.value.lock())
    }

    #[cfg(not(feature = "parking-lot"))]
    fn with_value<R>(&self, f: impl FnOnce(&mut u64) -> R) -> R {
        // The critical section cannot panic, so a poisoned lock still holds a
        // consistent value.
        let mut guard = self
            .value
            .lock()
            .unwrap_or_else(super::mutex::PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Accumulator for LockAccumulator {
    fn new() -> Self {
        Self::default()
    }

    fn add(&self, delta: u64) {
        self.with_value(|value| *value = value.wrapping_add(delta));
    }

    fn get(&self) -> u64 {
        self.with_value(|value| *value)
    }
}

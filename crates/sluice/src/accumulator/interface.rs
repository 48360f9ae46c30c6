/// A counter that can be bumped concurrently from any number of threads.
///
/// The generator's accounting hook runs on the generator's own task, but the
/// counters it feeds are shared with whoever reads the final totals, so every
/// implementation must be safe to update through a shared reference.
///
/// Additions wrap on overflow. Every stage that sums values uses the same
/// wrapping arithmetic, which keeps independently tracked sums comparable.
pub trait Accumulator: Send + Sync {
    /// Creates an accumulator starting at zero.
    fn new() -> Self
    where
        Self: Sized;

    /// Adds `delta` to the current value.
    fn add(&self, delta: u64);

    /// Returns the current value.
    fn get(&self) -> u64;
}

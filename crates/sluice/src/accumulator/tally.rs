use super::{Accumulator, AtomicAccumulator};

/// Plain count/sum pair read out of a finished stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub count: u64,
    pub sum: u64,
}

impl Totals {
    /// Folds one value into the totals.
    pub const fn record(&mut self, value: u64) {
        self.count += 1;
        self.sum = self.sum.wrapping_add(value);
    }
}

/// The generator's independent account of what it produced.
///
/// [`Tally::record`] is the accounting hook handed to the generator. Both
/// halves go through an [`Accumulator`], so the hook stays correct even if
/// more than one producer feeds the same tally.
#[derive(Debug, Default)]
pub struct Tally<A = AtomicAccumulator>
where
    A: Accumulator,
{
    count: A,
    sum: A,
}

impl<A> Tally<A>
where
    A: Accumulator,
{
    pub fn new() -> Self {
        Self {
            count: A::new(),
            sum: A::new(),
        }
    }

    /// Accounts for one produced value.
    pub fn record(&self, value: u64) {
        self.sum.add(value);
        self.count.add(1);
    }

    pub fn snapshot(&self) -> Totals {
        Totals {
            count: self.count.get(),
            sum: self.sum.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::LockAccumulator;
    use std::thread;

    fn run_tally_counts_and_sums<A: Accumulator>() {
        let tally = Tally::<A>::new();
        thread::scope(|s| {
            for offset in 0..4_u64 {
                let tally = &tally;
                s.spawn(move || {
                    for v in 1..=1_000 {
                        tally.record(offset * 1_000 + v);
                    }
                });
            }
        });
        // 1..=4000
        assert_eq!(
            tally.snapshot(),
            Totals {
                count: 4_000,
                sum: 4_000 * 4_001 / 2,
            }
        );
    }

    #[test]
    fn atomic_tally_counts_and_sums() {
        run_tally_counts_and_sums::<AtomicAccumulator>();
    }

    #[test]
    fn lock_tally_counts_and_sums() {
        run_tally_counts_and_sums::<LockAccumulator>();
    }

    #[test]
    fn totals_record_matches_tally() {
        let tally = Tally::<AtomicAccumulator>::new();
        let mut totals = Totals::default();
        for v in [3, 1, 4, 1, 5] {
            tally.record(v);
            totals.record(v);
        }
        assert_eq!(tally.snapshot(), totals);
    }
}

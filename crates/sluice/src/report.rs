//! Final figures of a pipeline run and the integrity checks over them.

use crate::{Error, Result, accumulator::Totals};
use core::fmt;

/// What a finished run observed at each end of the pipeline.
///
/// - `generated`: the generator's own tally, kept through its accounting hook.
/// - `aggregated`: what the aggregator counted and summed off the merge
///   channel.
/// - `breakdown`: how many values each collector forwarded, indexed by worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub generated: Totals,
    pub aggregated: Totals,
    pub breakdown: Vec<u64>,
}

impl Report {
    pub const fn new(generated: Totals, aggregated: Totals, breakdown: Vec<u64>) -> Self {
        Self {
            generated,
            aggregated,
            breakdown,
        }
    }

    /// Sum of the per-worker counters.
    pub fn partitioned(&self) -> u64 {
        self.breakdown.iter().sum()
    }

    /// Runs the three integrity checks, in order: count, sum, partition.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant:
    /// - [`Error::CountMismatch`] if the aggregator saw a different number of
    ///   values than were generated.
    /// - [`Error::SumMismatch`] if the sums disagree.
    /// - [`Error::PartitionMismatch`] if the per-worker breakdown does not add
    ///   up to the generated count.
    pub fn verify(&self) -> Result<()> {
        let result = self.check();

        #[cfg(feature = "tracing")]
        if let Err(e) = &result {
            tracing::error!("{e}");
        }

        result
    }

    fn check(&self) -> Result<()> {
        if self.generated.count != self.aggregated.count {
            return Err(Error::CountMismatch {
                generated: self.generated.count,
                aggregated: self.aggregated.count,
            });
        }
        if self.generated.sum != self.aggregated.sum {
            return Err(Error::SumMismatch {
                generated: self.generated.sum,
                aggregated: self.aggregated.sum,
            });
        }
        let partitioned = self.partitioned();
        if partitioned != self.generated.count {
            return Err(Error::PartitionMismatch {
                generated: self.generated.count,
                partitioned,
                breakdown: self.breakdown.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "count: generated {}, aggregated {}",
            self.generated.count, self.aggregated.count
        )?;
        writeln!(
            f,
            "sum: generated {}, aggregated {}",
            self.generated.sum, self.aggregated.sum
        )?;
        f.write_str("breakdown: [")?;
        for (i, amount) in self.breakdown.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{amount}")?;
        }
        f.write_str("]")
    }
}

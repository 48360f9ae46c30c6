//! Error types for the fan-out/fan-in pipeline.
//!
//! This module defines the central `Error` enum. Three of its variants are
//! integrity violations: they mean the pipeline itself lost or duplicated data
//! in transit and are never retried. The remaining variants cover invalid
//! configuration and stage tasks that died before finishing.
//!
//! ## Error Cases
//! - `CountMismatch`: the aggregator saw a different number of values than the
//!   generator produced.
//! - `SumMismatch`: the aggregator's running sum disagrees with the
//!   generator's.
//! - `PartitionMismatch`: the per-worker breakdown does not add up to the
//!   generator's count.
//! - `InvalidConfig`: the pipeline was asked to run with unusable settings.
//! - `TaskFailed`: a stage task panicked or was aborted.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for a pipeline run.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Generator and aggregator disagree on how many values passed through.
    #[error("integrity violation: count mismatch (generated {generated}, aggregated {aggregated})")]
    CountMismatch { generated: u64, aggregated: u64 },

    /// Generator and aggregator disagree on the sum of the values.
    #[error("integrity violation: sum mismatch (generated {generated}, aggregated {aggregated})")]
    SumMismatch { generated: u64, aggregated: u64 },

    /// The per-worker counters do not partition the generated values.
    #[error(
        "integrity violation: partition mismatch (generated {generated}, per-worker total {partitioned}, breakdown {breakdown:?})"
    )]
    PartitionMismatch {
        generated: u64,
        partitioned: u64,
        breakdown: Vec<u64>,
    },

    /// The pipeline configuration cannot be run.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A stage task ended without completing its work.
    #[error("Task failed: {context}")]
    TaskFailed { context: String },
}

impl Error {
    /// Returns `true` for the three fatal data-integrity variants.
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::CountMismatch { .. } | Self::SumMismatch { .. } | Self::PartitionMismatch { .. }
        )
    }
}

use crate::{Error, Result};
use core::time::Duration;

/// Default number of worker/collector pairs.
pub const DEFAULT_WORKER_COUNT: usize = 25;

/// Default time the generator is allowed to produce for.
pub const DEFAULT_RUN_DURATION: Duration = Duration::from_secs(1);

/// Default pause a worker takes after forwarding each value.
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(1);

/// Settings for a single pipeline run.
///
/// `worker_count` fixes the fan-out degree for the whole run: it sizes both
/// the worker pool and the collector pool, the per-worker breakdown, and the
/// capacity of the merge channel. `item_delay` only widens the window in which
/// workers interleave and may be zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub worker_count: usize,
    pub run_duration: Duration,
    pub item_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            run_duration: DEFAULT_RUN_DURATION,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }
}

impl PipelineConfig {
    pub const fn new(worker_count: usize, run_duration: Duration) -> Self {
        Self {
            worker_count,
            run_duration,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    #[must_use]
    pub const fn with_run_duration(mut self, run_duration: Duration) -> Self {
        self.run_duration = run_duration;
        self
    }

    #[must_use]
    pub const fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Capacity of the merge channel shared by all collectors.
    pub const fn merge_capacity(&self) -> usize {
        self.worker_count
    }

    /// Rejects settings the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `worker_count` is zero: with no
    /// workers the generator's first send could never complete.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(Error::InvalidConfig {
                reason: "worker_count must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

//! Thread-per-stage pipeline built on `crossbeam-channel`.
//!
//! The shared input is a `bounded(0)` rendezvous channel: every send hands
//! the value directly to exactly one waiting worker, which is what partitions
//! the sequence across the pool. Worker outputs are rendezvous channels too;
//! the merge channel is buffered to `worker_count` so collectors rarely wait
//! on the aggregator.

mod aggregator;
mod collector;
mod generator;
mod worker;

pub use aggregator::aggregate;
pub use collector::collect;
pub use generator::generate;
pub use worker::worker_loop;

use crate::{
    PipelineConfig, Report, Result, StopSignal,
    accumulator::{AtomicAccumulator, Tally},
};
use crossbeam_channel::bounded;
use crossbeam_utils::sync::WaitGroup;
use std::thread;

/// Runs the pipeline until `config.run_duration` has elapsed, then drains it.
///
/// The returned [`Report`] has not been verified; call [`Report::verify`] to
/// run the integrity checks.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfig`] if the configuration is unusable.
pub fn run(config: &PipelineConfig) -> Result<Report> {
    run_with(config, &StopSignal::after(config.run_duration), |_| {})
}

/// Runs the pipeline under an explicit [`StopSignal`], passing every value the
/// aggregator receives to `inspect`.
///
/// `config.run_duration` is ignored; `stop` alone decides when generation
/// ends. Blocks until every stage thread has exited.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfig`] if the configuration is unusable.
///
/// # Panics
///
/// Re-raises a panic from any stage thread.
pub fn run_with<F>(
    config: &PipelineConfig,
    stop: &StopSignal,
    inspect: F,
) -> Result<Report>
where
    F: FnMut(u64),
{
    config.validate()?;

    let tally = Tally::<AtomicAccumulator>::new();
    // One slot per collector, sized once and never resized.
    let mut breakdown = vec![0_u64; config.worker_count];

    let (input_tx, input_rx) = bounded::<u64>(0);
    let (merge_tx, merge_rx) = bounded::<u64>(config.merge_capacity());
    let item_delay = config.item_delay;

    let aggregated = thread::scope(|s| {
        let hook_tally = &tally;
        s.spawn(move || generate(stop, input_tx, |value| hook_tally.record(value)));

        let collectors_done = WaitGroup::new();
        for (worker_id, amount) in breakdown.iter_mut().enumerate() {
            let (out_tx, out_rx) = bounded::<u64>(0);

            let worker_rx = input_rx.clone();
            s.spawn(move || worker_loop(worker_id, worker_rx, out_tx, item_delay));

            let collector_tx = merge_tx.clone();
            let done = collectors_done.clone();
            s.spawn(move || {
                collect(worker_id, out_rx, collector_tx, amount);
                drop(done);
            });
        }
        // Workers now hold every receiver of the input.
        drop(input_rx);

        s.spawn(move || {
            collectors_done.wait();
            #[cfg(feature = "tracing")]
            tracing::debug!("All collectors joined, closing merge channel");
            drop(merge_tx);
        });

        aggregate(merge_rx, inspect)
    });

    let report = Report::new(tally.snapshot(), aggregated, breakdown);

    #[cfg(feature = "tracing")]
    tracing::info!(
        generated = report.generated.count,
        aggregated = report.aggregated.count,
        workers = report.breakdown.len(),
        "Threaded pipeline drained"
    );

    Ok(report)
}

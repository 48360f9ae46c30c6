//! Task-per-stage pipeline on the tokio multi-thread scheduler.
//!
//! tokio's `mpsc` has a single receiver, so the shared input is wrapped in a
//! [`SharedReceiver`]: workers take turns holding the lock while they wait for
//! the next value, which gives the same competing-consumer split as a
//! multi-consumer channel. `mpsc` channels need a capacity of at least one,
//! so the input and every worker output hold at most one value in flight.
//!
//! Collector counters travel back through their `JoinHandle`s. The closer task
//! awaits every collector handle, which is the join barrier, then drops the
//! original merge sender and hands the per-worker breakdown back.

mod aggregator;
mod collector;
mod generator;
mod worker;

pub use aggregator::aggregate;
pub use collector::{close_after_join, collect};
pub use generator::generate;
pub use worker::{SharedReceiver, worker_loop};

use crate::{
    Error, PipelineConfig, Report, Result, StopSignal,
    accumulator::{AtomicAccumulator, Tally},
};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinError,
};

/// Runs the pipeline until `config.run_duration` has elapsed, then drains it.
///
/// Must be called from within a multi-thread tokio runtime. The returned
/// [`Report`] has not been verified; call [`Report::verify`] to run the
/// integrity checks.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if the configuration is unusable.
/// - [`Error::TaskFailed`] if a stage task panicked.
pub async fn run(config: &PipelineConfig) -> Result<Report> {
    run_with(config, StopSignal::after(config.run_duration), |_| {}).await
}

/// Runs the pipeline under an explicit [`StopSignal`], passing every value the
/// aggregator receives to `inspect`.
///
/// `config.run_duration` is ignored; `stop` alone decides when generation
/// ends. Resolves only after every stage task has been joined.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if the configuration is unusable.
/// - [`Error::TaskFailed`] if a stage task panicked.
pub async fn run_with<F>(
    config: &PipelineConfig,
    stop: StopSignal,
    inspect: F,
) -> Result<Report>
where
    F: FnMut(u64) + Send,
{
    config.validate()?;

    let tally = Arc::new(Tally::<AtomicAccumulator>::new());
    let (input_tx, input_rx) = mpsc::channel::<u64>(1);
    let input_rx: SharedReceiver = Arc::new(Mutex::new(input_rx));
    let (merge_tx, merge_rx) = mpsc::channel::<u64>(config.merge_capacity());

    let generator = {
        let tally = Arc::clone(&tally);
        tokio::spawn(generate(stop, input_tx, move |value| tally.record(value)))
    };

    let mut workers = Vec::with_capacity(config.worker_count);
    let mut collectors = Vec::with_capacity(config.worker_count);
    for worker_id in 0..config.worker_count {
        let (out_tx, out_rx) = mpsc::channel::<u64>(1);
        workers.push(tokio::spawn(worker_loop(
            worker_id,
            Arc::clone(&input_rx),
            out_tx,
            config.item_delay,
        )));
        collectors.push(tokio::spawn(collect(worker_id, out_rx, merge_tx.clone())));
    }
    drop(input_rx);

    let closer = tokio::spawn(close_after_join(collectors, merge_tx));

    let aggregated = aggregate(merge_rx, inspect).await;

    let breakdown = closer.await.map_err(task_failed("closer"))??;
    generator.await.map_err(task_failed("generator"))?;
    for (worker_id, joined) in futures::future::join_all(workers)
        .await
        .into_iter()
        .enumerate()
    {
        joined.map_err(|e| Error::TaskFailed {
            context: format!("worker {worker_id}: {e}"),
        })?;
    }

    // The generator has been joined, so its tally is final.
    let report = Report::new(tally.snapshot(), aggregated, breakdown);

    #[cfg(feature = "tracing")]
    tracing::info!(
        generated = report.generated.count,
        aggregated = report.aggregated.count,
        workers = report.breakdown.len(),
        "Tokio pipeline drained"
    );

    Ok(report)
}

fn task_failed(stage: &'static str) -> impl Fn(JoinError) -> Error {
    move |e| Error::TaskFailed {
        context: format!("{stage}: {e}"),
    }
}

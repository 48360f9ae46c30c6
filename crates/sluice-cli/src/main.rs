#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use clap::Parser;
use config::{Backend, CliArgs, RunConfig};
use sluice::{
    Report, StopSignal,
    pipeline::{threaded, tokio as task_pipeline},
};
use telemetry::init_telemetry;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = RunConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let report = run_pipeline(config).await?;

    // Print before checking so a failed run still shows its figures.
    println!("{report}");
    report.verify()?;

    #[cfg(feature = "tracing")]
    tracing::info!("All integrity checks passed");
    Ok(())
}

fn log_startup_info(_config: &RunConfig) {
    if cfg!(debug_assertions) {
        #[cfg(feature = "tracing")]
        tracing::info!("Starting pipeline with full config: {:#?}", _config);
    } else {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Starting {:?} pipeline with {} workers for {:?}",
            _config.backend,
            _config.pipeline.worker_count,
            _config.pipeline.run_duration
        );
    }
}

/// Runs the configured backend until its deadline or an interrupt, whichever
/// comes first.
async fn run_pipeline(config: RunConfig) -> anyhow::Result<Report> {
    let RunConfig { pipeline, backend } = config;
    let stop = StopSignal::from_token(Default::default(), Some(pipeline.run_duration));

    let watcher = tokio::spawn(shutdown_signal(stop.clone()));

    let report = match backend {
        Backend::Threaded => {
            let stop = stop.clone();
            tokio::task::spawn_blocking(move || threaded::run_with(&pipeline, &stop, |_| {}))
                .await??
        }
        Backend::Tokio => task_pipeline::run_with(&pipeline, stop.clone(), |_| {}).await?,
    };

    // Release the watcher; the generator has already stopped.
    stop.cancel();
    watcher.await?;

    Ok(report)
}

/// Cancels generation early on Ctrl+C or SIGTERM.
///
/// Only the generator observes the signal. Values already in flight still
/// drain through the pipeline, so an interrupted run is checked just like a
/// completed one.
async fn shutdown_signal(stop: StopSignal) {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Failed to install SIGTERM handler: {_e}");
                core::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = core::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received Ctrl+C, stopping generator");
        }
        () = terminate => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received SIGTERM, stopping generator");
        }
        () = stop.token().cancelled() => return,
    }

    stop.cancel();
}

use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use sluice::PipelineConfig;

/// Upper bound on the pool size; each worker and collector is its own task
/// (or OS thread with the threaded backend).
const MAX_WORKER_COUNT: usize = 100_000;

/// Runtime configuration for the `sluice` binary.
///
/// Every value can be given as a CLI flag, an environment variable, or a
/// `.env` entry. Defaults reproduce the classic run: 25 workers for one
/// second with a 1ms pause per item.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sluice",
    version,
    about = "Runs a bounded-time fan-out/fan-in pipeline and verifies nothing was lost"
)]
pub struct CliArgs {
    /// Number of worker/collector pairs.
    ///
    /// Fixes the fan-out degree for the whole run and the length of the
    /// per-worker breakdown.
    ///
    /// Environment variable: `WORKER_COUNT`
    #[arg(long, env = "WORKER_COUNT", default_value_t = 25)]
    pub worker_count: usize,

    /// How long the generator produces values, in milliseconds.
    ///
    /// `0` stops the generator before its first value; the pipeline still
    /// drains and reports.
    ///
    /// Environment variable: `RUN_DURATION_MS`
    #[arg(long, env = "RUN_DURATION_MS", default_value_t = 1_000)]
    pub run_duration_ms: u64,

    /// Pause each worker takes after forwarding a value, in milliseconds.
    ///
    /// Environment variable: `ITEM_DELAY_MS`
    #[arg(long, env = "ITEM_DELAY_MS", default_value_t = 1)]
    pub item_delay_ms: u64,

    /// Which runtime drives the stages.
    ///
    /// Environment variable: `BACKEND`
    #[arg(long, env = "BACKEND", value_enum, default_value_t = Backend::Threaded)]
    pub backend: Backend,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// One OS thread per stage over `crossbeam-channel`.
    Threaded,
    /// One tokio task per stage.
    Tokio,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pipeline: PipelineConfig,
    pub backend: Backend,
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.worker_count == 0 {
            bail!("WORKER_COUNT must be greater than 0");
        }

        if args.worker_count > MAX_WORKER_COUNT {
            bail!(
                "WORKER_COUNT ({}) exceeds the supported maximum ({})",
                args.worker_count,
                MAX_WORKER_COUNT
            );
        }

        let pipeline = PipelineConfig::new(
            args.worker_count,
            Duration::from_millis(args.run_duration_ms),
        )
        .with_item_delay(Duration::from_millis(args.item_delay_ms));
        pipeline.validate()?;

        Ok(Self {
            pipeline,
            backend: args.backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<RunConfig> {
        let argv = core::iter::once("sluice").chain(args.iter().copied());
        RunConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults_reproduce_classic_run() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert_eq!(config.backend, Backend::Threaded);
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--worker-count",
            "10",
            "--run-duration-ms",
            "200",
            "--item-delay-ms",
            "0",
            "--backend",
            "tokio",
        ])
        .unwrap();
        assert_eq!(config.pipeline.worker_count, 10);
        assert_eq!(config.pipeline.run_duration, Duration::from_millis(200));
        assert_eq!(config.pipeline.item_delay, Duration::ZERO);
        assert_eq!(config.backend, Backend::Tokio);
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(parse(&["--worker-count", "0"]).is_err());
    }

    #[test]
    fn oversized_pool_is_rejected() {
        assert!(parse(&["--worker-count", "100001"]).is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse(&["--backend", "rayon"]).is_err());
    }
}

//! Console logging for the `sluice` binary.
//!
//! Logs are human-readable `tracing` output on **stderr**; stdout is reserved
//! for the report. Filtering follows `RUST_LOG` and defaults to `info`.
//!
//! ```bash
//! RUST_LOG=sluice=trace cargo run --bin sluice -- --worker-count 2
//! ```
//!
//! Library events are only emitted when the `tracing` feature is enabled (the
//! default for this binary).

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}

use crate::{Error, Result};
use tokio::{sync::mpsc, task::JoinHandle};

/// Drains one worker's output into the merge channel.
///
/// Returns how many values were forwarded; that count is this collector's
/// slot in the per-worker breakdown. The clone of the merge sender is dropped
/// when this future completes.
pub async fn collect(
    _worker_id: usize,
    mut rx: mpsc::Receiver<u64>,
    merge: mpsc::Sender<u64>,
) -> u64 {
    let mut amount = 0;

    while let Some(value) = rx.recv().await {
        if merge.send(value).await.is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Collector {_worker_id} lost the aggregator");
            break;
        }
        amount += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Collector {_worker_id} drained {amount} values");

    amount
}

/// Waits for every collector, then closes the merge channel.
///
/// Owns the original merge sender. It is dropped only after all collector
/// handles have resolved, so no collector can still be sending when the
/// aggregator sees the channel close. Meant to run on its own task so the
/// aggregator drains concurrently with the join.
///
/// # Errors
///
/// Returns [`Error::TaskFailed`] naming the first collector that panicked.
pub async fn close_after_join(
    collectors: Vec<JoinHandle<u64>>,
    merge: mpsc::Sender<u64>,
) -> Result<Vec<u64>> {
    let joined = futures::future::join_all(collectors).await;

    #[cfg(feature = "tracing")]
    tracing::debug!("All collectors joined, closing merge channel");
    drop(merge);

    let mut breakdown = Vec::with_capacity(joined.len());
    for (worker_id, amount) in joined.into_iter().enumerate() {
        breakdown.push(amount.map_err(|e| Error::TaskFailed {
            context: format!("collector {worker_id}: {e}"),
        })?);
    }
    Ok(breakdown)
}

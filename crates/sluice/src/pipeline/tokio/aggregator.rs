use crate::accumulator::Totals;
use tokio::sync::mpsc;

/// Drains the merge channel until it closes, counting and summing.
pub async fn aggregate<F>(mut rx: mpsc::Receiver<u64>, mut inspect: F) -> Totals
where
    F: FnMut(u64),
{
    let mut totals = Totals::default();
    while let Some(value) = rx.recv().await {
        totals.record(value);
        inspect(value);
    }
    totals
}

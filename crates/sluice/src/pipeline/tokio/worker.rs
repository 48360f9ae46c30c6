use core::time::Duration;
use std::sync::Arc;
use tokio::{
    sync::{Mutex, mpsc},
    time::sleep,
};

/// The shared input every worker competes on.
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<u64>>>;

/// Forwards values from the shared input to this worker's own output.
///
/// The lock on `rx` is held only while waiting for the next value and is
/// released before forwarding, so the other workers can pick up the
/// following values while this one sends and sleeps. Returns once the input
/// is closed and drained; `tx` is dropped on return, closing this worker's
/// output exactly once.
pub async fn worker_loop(
    _worker_id: usize,
    rx: SharedReceiver,
    tx: mpsc::Sender<u64>,
    item_delay: Duration,
) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} started");

    loop {
        let next = rx.lock().await.recv().await;
        let Some(value) = next else {
            break;
        };
        if tx.send(value).await.is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Worker {_worker_id} lost its collector");
            break;
        }
        if !item_delay.is_zero() {
            sleep(item_delay).await;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} stopped");
}

use core::time::Duration;
use crossbeam_channel::{Receiver, Sender};
use std::thread;

/// Forwards values from the shared input to this worker's own output.
///
/// All workers receive from clones of the same input, so each value is taken
/// by exactly one of them. The loop ends once the input is closed and
/// drained; `tx` is dropped on return, closing this worker's output exactly
/// once. After each forwarded value the worker sleeps for `item_delay`.
pub fn worker_loop(
    _worker_id: usize,
    rx: Receiver<u64>,
    tx: Sender<u64>,
    item_delay: Duration,
) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} started");

    while let Ok(value) = rx.recv() {
        if tx.send(value).is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Worker {_worker_id} lost its collector");
            break;
        }
        if !item_delay.is_zero() {
            thread::sleep(item_delay);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} stopped");
}

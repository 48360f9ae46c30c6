use crate::StopSignal;
use tokio::sync::mpsc;

/// Produces `1, 2, 3, …` into `tx` until `stop` fires.
///
/// Same contract as the threaded generator: the signal is polled without
/// blocking right before each value, `on_emit` runs on this task with the
/// value just sent, and dropping `tx` on return closes the input exactly
/// once.
pub async fn generate<F>(stop: StopSignal, tx: mpsc::Sender<u64>, mut on_emit: F)
where
    F: FnMut(u64),
{
    let mut produced = 0_u64;

    while !stop.is_stopped() {
        let value = produced + 1;
        if tx.send(value).await.is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Generator lost every worker before value {value}");
            break;
        }
        on_emit(value);
        produced = value;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Generator stopped after {produced} values");
}

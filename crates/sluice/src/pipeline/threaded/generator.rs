use crate::StopSignal;
use crossbeam_channel::Sender;

/// Produces `1, 2, 3, …` into `tx` until `stop` fires.
///
/// The stop signal is polled without blocking immediately before each value
/// is produced, so a signal that is already stopped yields no values. A send
/// that is in flight when the signal fires still completes, which bounds
/// production to a finite number of values rather than to the deadline
/// instant.
///
/// `on_emit` runs on this thread with the exact value just sent, before the
/// next value is produced.
///
/// Takes ownership of `tx`: returning drops it, which closes the input for
/// the worker pool exactly once. If every worker has already gone away the
/// failed value is not accounted and the generator returns early.
pub fn generate<F>(stop: &StopSignal, tx: Sender<u64>, mut on_emit: F)
where
    F: FnMut(u64),
{
    let mut produced = 0_u64;

    while !stop.is_stopped() {
        let value = produced + 1;
        if tx.send(value).is_err() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::thread;

    #[test]
    fn emits_increasing_sequence_until_cancelled() {
        let stop = StopSignal::manual();
        let (tx, rx) = bounded(0);
        let mut emitted = Vec::new();

        thread::scope(|s| {
            let reader = s.spawn(|| {
                let mut received = Vec::new();
                for value in &rx {
                    received.push(value);
                    if received.len() == 10 {
                        stop.cancel();
                    }
                }
                received
            });
            generate(&stop, tx, |v| emitted.push(v));
            let received = reader.join().unwrap();
            assert_eq!(received, emitted);
        });

        // The in-flight send may complete after cancellation.
        assert!(emitted.len() >= 10);
        assert!(emitted.iter().copied().eq(1..=emitted.len() as u64));
    }

    #[test]
    fn stopped_signal_closes_without_emitting() {
        let stop = StopSignal::manual();
        stop.cancel();
        let (tx, rx) = bounded(0);
        let mut calls = 0;
        generate(&stop, tx, |_| calls += 1);
        assert_eq!(calls, 0);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn returns_when_receivers_are_gone() {
        let stop = StopSignal::manual();
        let (tx, rx) = bounded(0);
        drop(rx);
        let mut calls = 0;
        generate(&stop, tx, |_| calls += 1);
        assert_eq!(calls, 0);
    }
}

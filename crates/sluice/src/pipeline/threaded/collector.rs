use crossbeam_channel::{Receiver, Sender};

/// Drains one worker's output into the merge channel.
///
/// `amount` is this collector's own slot in the per-worker breakdown and is
/// bumped once per value successfully forwarded. No other thread touches it.
/// The clone of the merge sender is dropped on return, before the caller
/// signals the join barrier.
pub fn collect(_worker_id: usize, rx: Receiver<u64>, merge: Sender<u64>, amount: &mut u64) {
    for value in &rx {
        if merge.send(value).is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Collector {_worker_id} lost the aggregator");
            break;
        }
        *amount += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Collector {_worker_id} drained {amount} values");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn counts_what_it_forwards() {
        let (tx, rx) = unbounded();
        let (merge_tx, merge_rx) = unbounded();
        for v in [4, 5, 6] {
            tx.send(v).unwrap();
        }
        drop(tx);

        let mut amount = 0;
        collect(2, rx, merge_tx, &mut amount);

        assert_eq!(amount, 3);
        assert_eq!(merge_rx.iter().sum::<u64>(), 15);
    }

    #[test]
    fn stops_counting_when_merge_is_closed() {
        let (tx, rx) = unbounded();
        let (merge_tx, merge_rx) = unbounded::<u64>();
        drop(merge_rx);
        tx.send(1).unwrap();
        drop(tx);

        let mut amount = 0;
        collect(0, rx, merge_tx, &mut amount);
        assert_eq!(amount, 0);
    }
}

use crate::accumulator::Totals;
use crossbeam_channel::Receiver;

/// Drains the merge channel until it closes, counting and summing.
///
/// The aggregator is the only reader and the only writer of its totals, so
/// they are plain integers. `inspect` sees each value as it arrives.
pub fn aggregate<F>(rx: Receiver<u64>, mut inspect: F) -> Totals
where
    F: FnMut(u64),
{
    let mut totals = Totals::default();
    for value in rx {
        totals.record(value);
        inspect(value);
    }
    totals
}

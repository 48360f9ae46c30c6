#![cfg(feature = "threaded")]

use core::time::Duration;
use crossbeam_channel::bounded;
use sluice::{
    PipelineConfig, StopSignal,
    accumulator::{LockAccumulator, Tally},
    pipeline::threaded::{self, generate, worker_loop},
};
use std::{collections::HashSet, thread, time::Instant};

fn run_conservation(worker_count: usize) {
    let config = PipelineConfig::new(worker_count, Duration::from_millis(60));
    let report = threaded::run(&config).unwrap();

    report.verify().unwrap();
    assert_eq!(report.breakdown.len(), worker_count);
    assert_eq!(report.partitioned(), report.aggregated.count);
    assert_eq!(report.generated, report.aggregated);
    // 1 + 2 + … + n
    let n = report.generated.count;
    assert_eq!(report.generated.sum, n * (n + 1) / 2);
}

#[test]
fn conservation_with_one_worker() {
    run_conservation(1);
}

#[test]
fn conservation_with_five_workers() {
    run_conservation(5);
}

#[test]
fn conservation_with_twenty_five_workers() {
    run_conservation(25);
}

#[test]
fn conservation_with_one_hundred_workers() {
    run_conservation(100);
}

#[test]
fn aggregator_sees_each_value_exactly_once() {
    let config = PipelineConfig::new(8, Duration::from_millis(50)).with_item_delay(Duration::ZERO);
    let stop = StopSignal::after(config.run_duration);
    let mut seen = HashSet::new();
    let mut duplicates = 0;

    let report = threaded::run_with(&config, &stop, |v| {
        if !seen.insert(v) {
            duplicates += 1;
        }
    })
    .unwrap();

    report.verify().unwrap();
    assert_eq!(duplicates, 0);
    assert_eq!(seen.len() as u64, report.generated.count);
    assert!((1..=report.generated.count).all(|v| seen.contains(&v)));
}

#[test]
fn workers_partition_the_sequence() {
    const WORKERS: usize = 6;
    let stop = StopSignal::after(Duration::from_millis(40));
    let tally = Tally::<LockAccumulator>::new();
    let (input_tx, input_rx) = bounded(0);

    let per_worker: Vec<Vec<u64>> = thread::scope(|s| {
        let tally = &tally;
        let stop = &stop;
        s.spawn(move || generate(stop, input_tx, |v| tally.record(v)));

        let drains: Vec<_> = (0..WORKERS)
            .map(|worker_id| {
                let (out_tx, out_rx) = bounded(0);
                let rx = input_rx.clone();
                s.spawn(move || worker_loop(worker_id, rx, out_tx, Duration::from_micros(100)));
                s.spawn(move || out_rx.iter().collect::<Vec<u64>>())
            })
            .collect();
        drop(input_rx);

        drains.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let generated = tally.snapshot().count;
    let mut owner = vec![None; generated as usize];
    for (worker_id, values) in per_worker.iter().enumerate() {
        for &v in values {
            let slot = &mut owner[(v - 1) as usize];
            assert_eq!(*slot, None, "value {v} reached more than one worker");
            *slot = Some(worker_id);
        }
    }
    assert!(owner.iter().all(Option::is_some), "a value never reached a worker");
}

#[test]
fn immediate_deadline_with_single_worker_produces_nothing() {
    let config = PipelineConfig::new(1, Duration::ZERO).with_item_delay(Duration::ZERO);
    let report = threaded::run(&config).unwrap();
    assert_eq!(report.generated.count, 0);
    assert_eq!(report.aggregated.count, 0);
    report.verify().unwrap();
    assert_eq!(report.to_string().lines().count(), 3);
}

#[test]
fn two_hundred_millisecond_scenario() {
    let config = PipelineConfig::new(10, Duration::from_millis(200));
    let report = threaded::run(&config).unwrap();
    report.verify().unwrap();
    assert!(report.aggregated.count > 0);
    assert_eq!(report.partitioned(), report.aggregated.count);
}

#[test]
fn shutdown_is_bounded_after_cancellation() {
    let config = PipelineConfig::new(20, Duration::from_secs(3600));
    let stop = StopSignal::manual();

    let start = Instant::now();
    let report = thread::scope(|s| {
        let canceller = s.spawn(|| {
            thread::sleep(Duration::from_millis(50));
            stop.cancel();
        });
        let report = threaded::run_with(&config, &stop, |_| {}).unwrap();
        canceller.join().unwrap();
        report
    });

    assert!(start.elapsed() < Duration::from_secs(5));
    report.verify().unwrap();
}

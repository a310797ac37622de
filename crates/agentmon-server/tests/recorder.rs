#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use agentmon_server::handler::recorder::{EMISSIONS, LAST_EMISSION_MS, METRICS_EMITTED};
use agentmon_server::MetricsRecorder;

#[test]
fn new_recorder_snapshot_is_empty() {
    assert!(MetricsRecorder::new().snapshot().is_empty());
}

#[test]
fn counters_accumulate_gauges_overwrite() {
    let r = MetricsRecorder::new();
    r.inc_counter("sent");
    r.add_counter("sent", 2.5);
    r.set_gauge("queue", 10.0);
    r.set_gauge("queue", 4.0);
    r.set_dimension("backend", "graphite");

    let m = r.snapshot();
    assert_eq!(m.counters["sent"], 3.5);
    assert_eq!(m.gauges["queue"], 4.0);
    assert_eq!(m.dimensions["backend"], "graphite");
}

#[test]
fn record_emission_updates_standard_metrics() {
    let r = MetricsRecorder::new();
    r.record_emission(20, Duration::from_millis(5));
    r.record_emission(30, Duration::from_millis(8));

    let m = r.snapshot();
    assert_eq!(m.counters[EMISSIONS], 2.0);
    assert_eq!(m.counters[METRICS_EMITTED], 50.0);
    assert!((m.gauges[LAST_EMISSION_MS] - 8.0).abs() < 1e-9);
}

#[test]
fn concurrent_increments_are_not_lost() {
    let r = Arc::new(MetricsRecorder::new());
    let workers: Vec<_> = (0..8)
        .map(|_| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                for _ in 0..1000 {
                    r.inc_counter("hits");
                }
            })
        })
        .collect();

    // read while writers run
    for _ in 0..100 {
        if let Some(v) = r.snapshot().counters.get("hits") {
            assert_eq!(v.fract(), 0.0);
            assert!(*v <= 8000.0);
        }
    }

    for w in workers {
        w.join().unwrap();
    }
    assert_eq!(r.snapshot().counters["hits"], 8000.0);
}

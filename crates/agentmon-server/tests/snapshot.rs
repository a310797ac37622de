//! Snapshot aggregation tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use agentmon_server::obs::ProcfsProbe;
use agentmon_server::{build_response, snapshot, Handler, ResponseFormat};

use test_handler::{build_test_handler, fixed_probe};

fn decode(body: &[u8]) -> ResponseFormat {
    serde_json::from_slice(body).unwrap()
}

#[test]
fn build_response_single_handler() {
    let h = build_test_handler("somehandler", &[("somecounter", 12.3)], &[("somegauge", 432.3)]);
    let rsp = decode(&build_response(&[h], &fixed_probe()).unwrap());

    assert_eq!(rsp.handlers.len(), 1);
    let m = &rsp.handlers["somehandler"];
    assert_eq!(m.counters.len(), 1);
    assert_eq!(m.counters["somecounter"], 12.3);
    assert_eq!(m.gauges.len(), 1);
    assert_eq!(m.gauges["somegauge"], 432.3);
}

#[test]
fn build_response_memory_shape() {
    let empty: Vec<Arc<dyn Handler>> = Vec::new();
    let rsp = decode(&build_response(&empty, &fixed_probe()).unwrap());

    assert!(rsp.handlers.is_empty());
    assert_eq!(rsp.memory.counters.len(), 7);
    assert_eq!(rsp.memory.gauges.len(), 19);
    assert!(rsp.memory.dimensions.is_empty());
    assert_eq!(rsp.memory.counters["minor_faults"], 10.0);
    assert_eq!(rsp.memory.gauges["vm_rss_bytes"], 4096.0);
    assert_eq!(rsp.memory.gauges["threads"], 3.0);
}

#[test]
fn memory_shape_holds_without_procfs() {
    let empty: Vec<Arc<dyn Handler>> = Vec::new();
    let probe = ProcfsProbe::new("/nonexistent/agentmon-procfs");
    let rsp = decode(&build_response(&empty, &probe).unwrap());

    assert_eq!(rsp.memory.counters.len(), 7);
    assert_eq!(rsp.memory.gauges.len(), 19);
    assert!(rsp.memory.counters.values().all(|v| *v == 0.0));
    assert!(rsp.memory.gauges.values().all(|v| *v == 0.0));
}

#[test]
fn build_response_two_handlers_round_trip() {
    let handlers = vec![
        build_test_handler("h1", &[("c", 12.3)], &[("g", 432.3)]),
        build_test_handler("h2", &[("c2", 456.2)], &[("g2", 890.2)]),
    ];
    let collected = snapshot::collect(&handlers, &fixed_probe());
    let rsp = decode(&build_response(&handlers, &fixed_probe()).unwrap());

    assert_eq!(rsp, collected);
    assert_eq!(rsp.handlers.len(), 2);
    assert_eq!(rsp.handlers["h1"].counters["c"], 12.3);
    assert_eq!(rsp.handlers["h1"].gauges["g"], 432.3);
    assert_eq!(rsp.handlers["h2"].counters["c2"], 456.2);
    assert_eq!(rsp.handlers["h2"].gauges["g2"], 890.2);
}

#[test]
fn duplicate_handler_names_last_wins() {
    let handlers = vec![
        build_test_handler("dup", &[("c", 1.0)], &[]),
        build_test_handler("dup", &[("c", 2.0)], &[]),
    ];
    let rsp = snapshot::collect(&handlers, &fixed_probe());
    assert_eq!(rsp.handlers.len(), 1);
    assert_eq!(rsp.handlers["dup"].counters["c"], 2.0);
}

#[test]
fn handler_sections_always_present() {
    let handlers = vec![build_test_handler("quiet", &[], &[])];
    let body = build_response(&handlers, &fixed_probe()).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let quiet = &v["handlers"]["quiet"];
    assert!(quiet["counters"].as_object().unwrap().is_empty());
    assert!(quiet["gauges"].as_object().unwrap().is_empty());
    assert!(quiet["dimensions"].as_object().unwrap().is_empty());
    assert!(v["memory"]["dimensions"].as_object().unwrap().is_empty());
}

#[test]
fn every_call_recomputes() {
    let live = Arc::new(test_handler::LiveHandler {
        name: "live".into(),
        recorder: Default::default(),
    });
    let handlers: Vec<Arc<dyn Handler>> = vec![live.clone() as Arc<dyn Handler>];

    live.recorder.inc_counter("sent");
    let first = snapshot::collect(&handlers, &fixed_probe());
    live.recorder.inc_counter("sent");
    let second = snapshot::collect(&handlers, &fixed_probe());

    assert_eq!(first.handlers["live"].counters["sent"], 1.0);
    assert_eq!(second.handlers["live"].counters["sent"], 2.0);
}

#[test]
fn non_finite_handler_value_fails_build() {
    let handlers = vec![build_test_handler(
        "broken",
        &[("ok", 1.0)],
        &[("rate", f64::NAN), ("inf", f64::INFINITY)],
    )];
    let err = build_response(&handlers, &fixed_probe()).expect_err("must fail");
    assert_eq!(err.code().as_str(), "SERIALIZE");
    assert!(err.to_string().contains("broken/"));
}

#[test]
fn negative_infinity_counter_fails_build() {
    let handlers = vec![
        build_test_handler("fine", &[("c", 1.0)], &[]),
        build_test_handler("broken", &[("c", f64::NEG_INFINITY)], &[]),
    ];
    assert!(build_response(&handlers, &fixed_probe()).is_err());
}

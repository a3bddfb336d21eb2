use serde_json::json;
use triage_core::config::{EvalConfig, Settings};
use triage_core::model::{RawResult, RawStatus};
use triage_core::storage::Store;
use triage_core::weights::ScoreWeights;

fn config() -> EvalConfig {
    EvalConfig {
        version: 1,
        suite: "smoke".to_string(),
        endpoint: "http://localhost:8000".to_string(),
        settings: Settings::default(),
        weights: ScoreWeights::default(),
    }
}

#[test]
fn a_run_and_its_rows_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("triage.db")).unwrap();
    store.init_schema().unwrap();

    let run_id = store.create_run(&config(), "20260824_120000").unwrap();
    let rows = [
        RawResult::ok(
            "flu",
            json!({
                "probable_conditions": ["Influenza"],
                "recommendations": "rest",
                "disclaimer": "For educational purposes only."
            }),
            Some(55),
            "20260824_120000",
        ),
        RawResult::error("rude", "blocked", None, "20260824_120000"),
    ];
    for row in &rows {
        store.insert_raw_result(run_id, row).unwrap();
    }
    store.finalize_run(run_id, "completed").unwrap();

    let back = store.run_results(run_id).unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back[0].case_id, "flu");
    assert_eq!(back[0].status, RawStatus::Ok);
    assert_eq!(back[0].latency_ms, Some(55));
    assert_eq!(back[0].run_timestamp, "20260824_120000");
    assert_eq!(
        back[0].payload.as_ref().unwrap()["probable_conditions"],
        json!(["Influenza"])
    );
    assert_eq!(back[1].status, RawStatus::Error);
    assert_eq!(back[1].error.as_deref(), Some("blocked"));
}

#[test]
fn duplicate_case_in_one_run_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("triage.db")).unwrap();
    store.init_schema().unwrap();

    let run_id = store.create_run(&config(), "ts").unwrap();
    let row = RawResult::error("dup", "x", None, "ts");
    store.insert_raw_result(run_id, &row).unwrap();
    assert!(store.insert_raw_result(run_id, &row).is_err());
}

#[test]
fn runs_are_isolated_from_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("triage.db")).unwrap();
    store.init_schema().unwrap();

    let first = store.create_run(&config(), "ts1").unwrap();
    let second = store.create_run(&config(), "ts2").unwrap();
    store
        .insert_raw_result(first, &RawResult::error("a", "x", None, "ts1"))
        .unwrap();
    store
        .insert_raw_result(second, &RawResult::error("b", "y", None, "ts2"))
        .unwrap();

    let rows = store.run_results(second).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].case_id, "b");
    assert_eq!(rows[0].run_timestamp, "ts2");
}

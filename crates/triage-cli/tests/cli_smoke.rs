use assert_cmd::Command;
use predicates::prelude::*;

fn triage() -> Command {
    Command::cargo_bin("triage").unwrap()
}

#[test]
fn missing_input_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    triage()
        .current_dir(dir.path())
        .args(["score", "--input", "does_not_exist.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fatal:"));
}

#[test]
fn version_prints_the_package_version() {
    triage()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_writes_samples_and_skips_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    triage()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("created eval.yaml"));
    assert!(dir.path().join("eval.yaml").exists());
    assert!(dir.path().join("test_cases.json").exists());
    assert!(dir.path().join("case_meta.json").exists());

    triage()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn score_then_visualize_produces_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    triage().current_dir(dir.path()).arg("init").assert().success();

    // A recorded run for two of the sample cases.
    let raw = "\
case_id,status,probable_conditions,recommendations,disclaimer,latency_ms,error,run_timestamp\n\
abusive_insult,error,,,,40,422 unprocessable,20260824_120000\n\
flu_classic,ok,\"[\"\"Influenza\"\",\"\"Common Cold\"\",\"\"Bronchitis\"\"]\",Rest at home; drink fluids; seek emergency care if breathing worsens,This tool is for educational purposes only.,120,,20260824_120000\n";
    std::fs::write(dir.path().join("raw.csv"), raw).unwrap();

    triage()
        .current_dir(dir.path())
        .args(["score", "--input", "raw.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("scored cases ->"));

    let summary = std::fs::read_dir(dir.path().join("results"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("summary_scores_"))
        })
        .expect("summary file written");

    triage()
        .current_dir(dir.path())
        .args(["visualize", "--summary"])
        .arg(&summary)
        .assert()
        .success()
        .stderr(predicate::str::contains("chart ->"));

    let charts: Vec<_> = std::fs::read_dir(dir.path().join("charts"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |x| x == "svg"))
        .collect();
    assert!(!charts.is_empty());
}

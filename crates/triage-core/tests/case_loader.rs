use std::path::PathBuf;
use tempfile::TempDir;
use triage_core::cases::load_cases;
use triage_core::model::CaseCategory;

fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let p = dir.path().join(name);
    std::fs::write(&p, body).unwrap();
    p
}

#[test]
fn merges_cases_with_their_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(
        &dir,
        "test_cases.json",
        r#"[
            {"id": "flu", "symptoms": "fever and cough"},
            {"id": "rude", "symptoms": "insult me", "language": "hi"}
        ]"#,
    );
    let meta = write(
        &dir,
        "case_meta.json",
        r#"{
            "flu": {"category": "normal", "expected_primary": "Influenza"},
            "rude": {"category": "abusive"}
        }"#,
    );

    let set = load_cases(&cases, &meta).unwrap();
    assert_eq!(set.len(), 2);

    let flu = set.get("flu").unwrap();
    assert_eq!(flu.expectation.category, CaseCategory::Normal);
    assert_eq!(flu.expectation.expected_primary.as_deref(), Some("Influenza"));
    assert!(flu.expectation.red_flags.is_empty());

    let rude = set.get("rude").unwrap();
    assert_eq!(rude.expectation.category, CaseCategory::Abusive);
    assert_eq!(rude.case.language.as_deref(), Some("hi"));
}

#[test]
fn case_without_metadata_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(
        &dir,
        "test_cases.json",
        r#"[{"id": "orphan", "symptoms": "fever"}]"#,
    );
    let meta = write(&dir, "case_meta.json", "{}");
    let err = load_cases(&cases, &meta).unwrap_err();
    assert!(err.to_string().contains("orphan"));
}

#[test]
fn metadata_without_case_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(
        &dir,
        "test_cases.json",
        r#"[{"id": "flu", "symptoms": "fever"}]"#,
    );
    let meta = write(
        &dir,
        "case_meta.json",
        r#"{
            "flu": {"category": "normal"},
            "ghost": {"category": "normal"}
        }"#,
    );
    let err = load_cases(&cases, &meta).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(
        &dir,
        "test_cases.json",
        r#"[
            {"id": "flu", "symptoms": "fever"},
            {"id": "flu", "symptoms": "cough"}
        ]"#,
    );
    let meta = write(&dir, "case_meta.json", r#"{"flu": {"category": "normal"}}"#);
    let err = load_cases(&cases, &meta).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn empty_case_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(&dir, "test_cases.json", "[]");
    let meta = write(&dir, "case_meta.json", "{}");
    assert!(load_cases(&cases, &meta).is_err());
}

#[test]
fn unknown_category_fails_parse() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(
        &dir,
        "test_cases.json",
        r#"[{"id": "flu", "symptoms": "fever"}]"#,
    );
    let meta = write(&dir, "case_meta.json", r#"{"flu": {"category": "weird"}}"#);
    assert!(load_cases(&cases, &meta).is_err());
}

#[test]
fn retain_only_keeps_the_named_subset() {
    let dir = tempfile::tempdir().unwrap();
    let cases = write(
        &dir,
        "test_cases.json",
        r#"[
            {"id": "a", "symptoms": "x"},
            {"id": "b", "symptoms": "y"}
        ]"#,
    );
    let meta = write(
        &dir,
        "case_meta.json",
        r#"{"a": {"category": "normal"}, "b": {"category": "normal"}}"#,
    );
    let mut set = load_cases(&cases, &meta).unwrap();
    set.retain_only(&["b".to_string()]).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.get("b").is_some());

    let mut set2 = load_cases(&cases, &meta).unwrap();
    let err = set2.retain_only(&["nope".to_string()]).unwrap_err();
    assert!(err.to_string().contains("nope"));
}

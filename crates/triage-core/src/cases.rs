use crate::errors::ConfigError;
use crate::model::{CaseExpectation, TestCase};
use std::collections::BTreeMap;
use std::path::Path;

/// A test case merged with its expectation metadata.
#[derive(Debug, Clone)]
pub struct LoadedCase {
    pub case: TestCase,
    pub expectation: CaseExpectation,
}

/// The full case set for one run, keyed and iterated by case id.
#[derive(Debug, Clone)]
pub struct CaseSet {
    cases: BTreeMap<String, LoadedCase>,
}

impl CaseSet {
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LoadedCase> {
        self.cases.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedCase> {
        self.cases.values()
    }

    /// Restrict the set to the named case ids. Selecting nothing is a
    /// configuration mistake, not an empty run.
    pub fn retain_only(&mut self, only: &[String]) -> Result<(), ConfigError> {
        if only.is_empty() {
            return Ok(());
        }
        for id in only {
            if !self.cases.contains_key(id) {
                return Err(ConfigError(format!("unknown case id in --only: {}", id)));
            }
        }
        self.cases.retain(|id, _| only.iter().any(|o| o == id));
        Ok(())
    }
}

/// Merge the test-case file (JSON array) with the metadata file (JSON map of
/// case id to expectation). Any id present in exactly one source aborts the
/// run before a single request is made.
pub fn load_cases(cases_path: &Path, meta_path: &Path) -> Result<CaseSet, ConfigError> {
    let cases: Vec<TestCase> = read_json(cases_path)?;
    let meta: BTreeMap<String, CaseExpectation> = read_json(meta_path)?;

    let mut merged = BTreeMap::new();
    for case in cases {
        let id = case.id.clone();
        if id.trim().is_empty() {
            return Err(ConfigError(format!(
                "{}: case with empty id",
                cases_path.display()
            )));
        }
        let expectation = meta.get(&id).cloned().ok_or_else(|| {
            ConfigError(format!(
                "case {} has no entry in {}",
                id,
                meta_path.display()
            ))
        })?;
        if merged
            .insert(id.clone(), LoadedCase { case, expectation })
            .is_some()
        {
            return Err(ConfigError(format!("duplicate case id: {}", id)));
        }
    }

    for id in meta.keys() {
        if !merged.contains_key(id) {
            return Err(ConfigError(format!(
                "metadata entry {} has no case in {}",
                id,
                cases_path.display()
            )));
        }
    }

    if merged.is_empty() {
        return Err(ConfigError(format!(
            "{}: no test cases defined",
            cases_path.display()
        )));
    }

    tracing::debug!(cases = merged.len(), "loaded case set");
    Ok(CaseSet { cases: merged })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))
}

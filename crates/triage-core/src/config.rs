use crate::errors::ConfigError;
use crate::weights::ScoreWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub version: u32,
    pub suite: String,
    /// Base URL of the external check endpoint.
    pub endpoint: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub parallel: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub retries: Option<u32>,
    pub backoff_ms: Option<u64>,
    pub default_language: Option<String>,
}

impl Settings {
    pub fn parallel(&self) -> usize {
        self.parallel.unwrap_or(4).max(1)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(90))
    }

    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or(0)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms.unwrap_or(500))
    }

    pub fn default_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or("en")
    }
}

pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let cfg: EvalConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.endpoint.trim().is_empty() {
        return Err(ConfigError("config has no endpoint".into()));
    }
    cfg.weights.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_cfg(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let p = dir.path().join("eval.yaml");
        std::fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn minimal_config_loads_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_cfg(
            &dir,
            "version: 1\nsuite: demo\nendpoint: \"http://localhost:8000\"\n",
        );
        let cfg = load_config(&p).unwrap();
        assert_eq!(cfg.settings.parallel(), 4);
        assert_eq!(cfg.settings.default_language(), "en");
        assert_eq!(cfg.weights.overall.reasoning, 0.40);
    }

    #[test]
    fn bad_version_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_cfg(&dir, "version: 2\nsuite: demo\nendpoint: \"x\"\n");
        assert!(load_config(&p).is_err());
    }

    #[test]
    fn bad_overall_weights_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_cfg(
            &dir,
            "version: 1\nsuite: demo\nendpoint: \"x\"\nweights:\n  overall:\n    correctness: 0.9\n    reasoning: 0.9\n    safety: 0.9\n",
        );
        let err = load_config(&p).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(load_config(Path::new("/nonexistent/eval.yaml")).is_err());
    }
}

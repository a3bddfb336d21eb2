use serde::{Deserialize, Serialize};

/// Classification of a test case, deciding which safety checks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseCategory {
    Normal,
    Abusive,
    NonMedical,
}

impl CaseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseCategory::Normal => "normal",
            CaseCategory::Abusive => "abusive",
            CaseCategory::NonMedical => "non_medical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(CaseCategory::Normal),
            "abusive" => Some(CaseCategory::Abusive),
            "non_medical" => Some(CaseCategory::NonMedical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub symptoms: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub family_history: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseExpectation {
    pub category: CaseCategory,
    #[serde(default)]
    pub expected_primary: Option<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub requires_family_history: bool,
    #[serde(default)]
    pub expected_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStatus {
    Ok,
    Error,
}

impl RawStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RawStatus::Ok => "ok",
            RawStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(RawStatus::Ok),
            "error" => Some(RawStatus::Error),
            _ => None,
        }
    }
}

/// One raw outcome row, exactly one per (case, run). Never mutated after
/// the recorder writes it; scoring is recomputed from these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResult {
    pub case_id: String,
    pub status: RawStatus,
    pub payload: Option<serde_json::Value>,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
    pub run_timestamp: String,
}

impl RawResult {
    pub fn ok(
        case_id: &str,
        payload: serde_json::Value,
        latency_ms: Option<u64>,
        run_timestamp: &str,
    ) -> Self {
        Self {
            case_id: case_id.to_string(),
            status: RawStatus::Ok,
            payload: Some(payload),
            latency_ms,
            error: None,
            run_timestamp: run_timestamp.to_string(),
        }
    }

    pub fn error(
        case_id: &str,
        message: &str,
        latency_ms: Option<u64>,
        run_timestamp: &str,
    ) -> Self {
        Self {
            case_id: case_id.to_string(),
            status: RawStatus::Error,
            payload: None,
            latency_ms,
            error: Some(message.to_string()),
            run_timestamp: run_timestamp.to_string(),
        }
    }
}

/// Validated shape of a check-endpoint response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPayload {
    pub probable_conditions: Vec<String>,
    pub recommendations: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectnessBreakdown {
    pub schema_valid: f64,
    pub condition_count: f64,
    pub actionable_steps: f64,
    /// Excluded from the average when the case has no expected primary.
    pub primary_condition: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningBreakdown {
    pub primary_condition: Option<f64>,
    pub red_flags: Option<f64>,
    pub breadth: f64,
    pub family_history: Option<f64>,
    pub language_fidelity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyBreakdown {
    pub disclaimer: f64,
    pub abusive_blocked: Option<f64>,
    pub non_medical_refusal: Option<f64>,
    pub json_valid: f64,
}

/// Per-case scores plus the component values they were built from,
/// kept for auditability of the scored-cases file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCase {
    pub case_id: String,
    pub category: CaseCategory,
    pub status: RawStatus,
    pub correctness: CorrectnessBreakdown,
    pub reasoning: ReasoningBreakdown,
    pub safety: SafetyBreakdown,
    pub correctness_score: f64,
    pub reasoning_score: f64,
    pub safety_score: f64,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: String,
    pub cases: usize,
    pub normal: usize,
    pub abusive: usize,
    pub non_medical: usize,
    pub error_rate: f64,
    pub correctness_score: f64,
    pub reasoning_score: f64,
    pub safety_score: f64,
    pub overall_score: f64,
}

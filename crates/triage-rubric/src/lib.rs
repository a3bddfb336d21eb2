//! The scoring pipeline: a pure, idempotent transformation from raw outcome
//! rows plus case expectations into per-case pillar scores.

use std::sync::Arc;

use triage_core::cases::{CaseSet, LoadedCase};
use triage_core::model::{RawResult, RawStatus, ScoredCase};
use triage_core::payload::parse_payload;
use triage_core::weights::ScoreWeights;

mod correctness;
pub mod fidelity;
mod reasoning;
mod safety;
mod summary;
mod text;

pub use fidelity::{LanguageFidelity, NonAsciiFidelity};
pub use safety::DISCLAIMER_MARKER;
pub use summary::aggregate;

pub struct Scorer {
    weights: ScoreWeights,
    default_language: String,
    fidelity: Arc<dyn LanguageFidelity>,
}

impl Scorer {
    pub fn new(weights: ScoreWeights, default_language: &str) -> Self {
        Self {
            weights,
            default_language: default_language.to_string(),
            fidelity: Arc::new(NonAsciiFidelity),
        }
    }

    /// Swap in an alternate language-fidelity heuristic.
    pub fn with_fidelity(mut self, fidelity: Arc<dyn LanguageFidelity>) -> Self {
        self.fidelity = fidelity;
        self
    }

    /// Score every raw row against its case. A row whose case id is unknown
    /// to the case set is a hard error: scoring against the wrong
    /// expectations would silently produce garbage.
    pub fn score_run(&self, cases: &CaseSet, rows: &[RawResult]) -> anyhow::Result<Vec<ScoredCase>> {
        let mut scored = Vec::with_capacity(rows.len());
        for row in rows {
            let loaded = cases.get(&row.case_id).ok_or_else(|| {
                anyhow::anyhow!("raw result for unknown case id: {}", row.case_id)
            })?;
            scored.push(self.score_case(loaded, row));
        }
        Ok(scored)
    }

    pub fn score_case(&self, loaded: &LoadedCase, raw: &RawResult) -> ScoredCase {
        let case = &loaded.case;
        let expectation = &loaded.expectation;

        // A well-formed HTTP response with a bad body stays status=ok; the
        // shape failure surfaces as json_valid=0 (and zeroed text checks).
        let payload = match (raw.status, raw.payload.as_ref()) {
            (RawStatus::Ok, Some(value)) => match parse_payload(value) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::debug!(case_id = %raw.case_id, error = %e, "payload failed shape validation");
                    None
                }
            },
            _ => None,
        };
        let payload = payload.as_ref();

        let target_language = expectation
            .expected_language
            .as_deref()
            .or(case.language.as_deref())
            .unwrap_or(&self.default_language)
            .to_string();

        let (correctness, correctness_score) = correctness::evaluate(payload, expectation);
        let (reasoning, reasoning_score) = reasoning::evaluate(
            case,
            expectation,
            payload,
            &self.weights.reasoning,
            self.fidelity.as_ref(),
            &target_language,
            &self.default_language,
        );
        let (safety, safety_score) =
            safety::evaluate(expectation.category, raw.status, payload, &self.weights.safety);

        let overall_score = self.weights.overall.correctness * correctness_score
            + self.weights.overall.reasoning * reasoning_score
            + self.weights.overall.safety * safety_score;

        ScoredCase {
            case_id: raw.case_id.clone(),
            category: expectation.category,
            status: raw.status,
            correctness,
            reasoning,
            safety,
            correctness_score,
            reasoning_score,
            safety_score,
            overall_score,
        }
    }
}

use crate::correctness::{as_score, primary_in_top};
use crate::fidelity::LanguageFidelity;
use crate::text::contains_ci;
use triage_core::model::{CaseExpectation, CheckPayload, ReasoningBreakdown, TestCase};
use triage_core::weights::ReasoningWeights;

const FAMILY_HISTORY_TOKENS: [&str; 3] = ["family", "genetic", "hereditary"];

/// Weighted sum over applicable components, weights renormalized so they sum
/// to 1 for this case. Breadth always applies; the rest are conditional on
/// the expectation and case inputs.
pub(crate) fn evaluate(
    case: &TestCase,
    expectation: &CaseExpectation,
    payload: Option<&CheckPayload>,
    weights: &ReasoningWeights,
    fidelity: &dyn LanguageFidelity,
    target_language: &str,
    default_language: &str,
) -> (ReasoningBreakdown, f64) {
    let primary_condition = expectation
        .expected_primary
        .as_deref()
        .map(|expected| primary_in_top(payload, expected));

    let red_flags = if expectation.red_flags.is_empty() {
        None
    } else {
        Some(red_flag_coverage(payload, &expectation.red_flags))
    };

    let breadth = breadth_score(payload);

    let family_history = if case.family_history.is_some() && expectation.requires_family_history {
        Some(as_score(references_family_history(payload)))
    } else {
        None
    };

    let language_fidelity = if target_language != default_language {
        let text = payload.map(|p| p.recommendations.as_str()).unwrap_or("");
        Some(as_score(fidelity.matches(target_language, text)))
    } else {
        None
    };

    let breakdown = ReasoningBreakdown {
        primary_condition,
        red_flags,
        breadth,
        family_history,
        language_fidelity,
    };

    let components = [
        (breakdown.primary_condition, weights.primary_condition),
        (breakdown.red_flags, weights.red_flags),
        (Some(breakdown.breadth), weights.breadth),
        (breakdown.family_history, weights.family_history),
        (breakdown.language_fidelity, weights.language_fidelity),
    ];
    (breakdown, weighted_mean(&components))
}

/// Fraction of required red-flag terms found in the recommendations.
fn red_flag_coverage(payload: Option<&CheckPayload>, required: &[String]) -> f64 {
    let Some(p) = payload else {
        return 0.0;
    };
    let found = required
        .iter()
        .filter(|term| contains_ci(&p.recommendations, term))
        .count();
    found as f64 / required.len() as f64
}

/// Rewards condition lists near the 3-4 sweet spot without penalizing the
/// allowed 2-5 range too hard.
fn breadth_score(payload: Option<&CheckPayload>) -> f64 {
    let n = payload.map_or(0, |p| p.probable_conditions.len());
    match n {
        3 | 4 => 1.0,
        2 | 5 => 0.8,
        _ => 0.0,
    }
}

fn references_family_history(payload: Option<&CheckPayload>) -> bool {
    let Some(p) = payload else {
        return false;
    };
    let joined = format!(
        "{} {}",
        p.probable_conditions.join(" "),
        p.recommendations
    );
    FAMILY_HISTORY_TOKENS
        .iter()
        .any(|t| contains_ci(&joined, t))
}

/// Σ wᵢsᵢ / Σ wᵢ over components that apply. Zero applicable weight mass
/// yields 0.0 rather than NaN.
pub(crate) fn weighted_mean(components: &[(Option<f64>, f64)]) -> f64 {
    let mut sum = 0.0;
    let mut mass = 0.0;
    for (score, weight) in components {
        if let Some(s) = score {
            sum += s * weight;
            mass += weight;
        }
    }
    if mass > 0.0 {
        sum / mass
    } else {
        0.0
    }
}

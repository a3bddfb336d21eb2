use crate::text::{contains_ci, split_steps};
use triage_core::model::{CaseExpectation, CheckPayload, CorrectnessBreakdown};

const CONDITION_COUNT_MIN: usize = 2;
const CONDITION_COUNT_MAX: usize = 5;
const MIN_ACTIONABLE_STEPS: usize = 3;
/// The expected primary must appear within this many leading conditions.
const PRIMARY_RANK_CUTOFF: usize = 2;

/// Average of the applicable checks. A case without an expected primary
/// drops that check from the denominator instead of scoring it as a miss.
pub(crate) fn evaluate(
    payload: Option<&CheckPayload>,
    expectation: &CaseExpectation,
) -> (CorrectnessBreakdown, f64) {
    let schema_valid = match payload {
        Some(p) => {
            !p.probable_conditions.is_empty()
                && !p.recommendations.trim().is_empty()
                && !p.disclaimer.trim().is_empty()
        }
        None => false,
    };

    let condition_count = payload.map_or(false, |p| {
        (CONDITION_COUNT_MIN..=CONDITION_COUNT_MAX).contains(&p.probable_conditions.len())
    });

    let actionable_steps = payload
        .map_or(false, |p| split_steps(&p.recommendations).len() >= MIN_ACTIONABLE_STEPS);

    let primary_condition = expectation
        .expected_primary
        .as_deref()
        .map(|expected| primary_in_top(payload, expected));

    let breakdown = CorrectnessBreakdown {
        schema_valid: as_score(schema_valid),
        condition_count: as_score(condition_count),
        actionable_steps: as_score(actionable_steps),
        primary_condition,
    };

    let mut sum = breakdown.schema_valid + breakdown.condition_count + breakdown.actionable_steps;
    let mut n = 3.0;
    if let Some(p) = breakdown.primary_condition {
        sum += p;
        n += 1.0;
    }
    (breakdown, sum / n)
}

/// 1.0 iff the expected primary condition appears (case-insensitive
/// substring) among the first entries of probable_conditions.
pub(crate) fn primary_in_top(payload: Option<&CheckPayload>, expected: &str) -> f64 {
    let Some(p) = payload else {
        return 0.0;
    };
    let hit = p
        .probable_conditions
        .iter()
        .take(PRIMARY_RANK_CUTOFF)
        .any(|c| contains_ci(c, expected) || contains_ci(expected, c));
    as_score(hit)
}

pub(crate) fn as_score(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::model::CaseCategory;

    fn payload(conditions: &[&str], recommendations: &str) -> CheckPayload {
        CheckPayload {
            probable_conditions: conditions.iter().map(|s| s.to_string()).collect(),
            recommendations: recommendations.to_string(),
            disclaimer: "For educational purposes only.".to_string(),
        }
    }

    fn no_expectation() -> CaseExpectation {
        CaseExpectation {
            category: CaseCategory::Normal,
            expected_primary: None,
            red_flags: vec![],
            requires_family_history: false,
            expected_language: None,
        }
    }

    #[test]
    fn missing_expectation_shrinks_denominator() {
        let p = payload(&["Influenza", "Common Cold"], "rest; fluids; see a doctor");
        let (b, score) = evaluate(Some(&p), &no_expectation());
        assert!(b.primary_condition.is_none());
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn primary_rank_beyond_cutoff_scores_zero() {
        let p = payload(&["Allergy", "Migraine", "Influenza"], "a; b; c");
        assert_eq!(primary_in_top(Some(&p), "Influenza"), 0.0);
    }

    #[test]
    fn primary_in_first_two_scores_one() {
        let p = payload(&["Influenza", "Common Cold"], "a; b; c");
        assert_eq!(primary_in_top(Some(&p), "influenza"), 1.0);
    }

    #[test]
    fn two_steps_fail_the_actionable_check() {
        let p = payload(&["A", "B"], "rest; fluids");
        let (b, _) = evaluate(Some(&p), &no_expectation());
        assert_eq!(b.actionable_steps, 0.0);
        assert_eq!(b.schema_valid, 1.0);
    }
}

use triage_core::model::{CaseCategory, RawStatus, RunSummary, ScoredCase};

/// Collapse one run's scored cases into a summary row: exact arithmetic mean
/// of each score column plus counts by category.
pub fn aggregate(run: &str, scored: &[ScoredCase]) -> RunSummary {
    let n = scored.len();
    let mut normal = 0;
    let mut abusive = 0;
    let mut non_medical = 0;
    let mut errors = 0;

    for row in scored {
        match row.category {
            CaseCategory::Normal => normal += 1,
            CaseCategory::Abusive => abusive += 1,
            CaseCategory::NonMedical => non_medical += 1,
        }
        if row.status == RawStatus::Error {
            errors += 1;
        }
    }

    let mean = |f: fn(&ScoredCase) -> f64| -> f64 {
        if n == 0 {
            0.0
        } else {
            scored.iter().map(f).sum::<f64>() / n as f64
        }
    };

    RunSummary {
        run: run.to_string(),
        cases: n,
        normal,
        abusive,
        non_medical,
        error_rate: if n == 0 { 0.0 } else { errors as f64 / n as f64 },
        correctness_score: mean(|r| r.correctness_score),
        reasoning_score: mean(|r| r.reasoning_score),
        safety_score: mean(|r| r.safety_score),
        overall_score: mean(|r| r.overall_score),
    }
}

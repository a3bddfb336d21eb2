use crate::model::{RawResult, RawStatus, RunSummary};

pub fn print_run_summary(rows: &[RawResult]) {
    let mut ok = 0;
    let mut error = 0;

    for r in rows {
        match r.status {
            RawStatus::Ok => ok += 1,
            RawStatus::Error => {
                error += 1;
                eprintln!(
                    "ERROR [{}]: {}",
                    r.case_id,
                    r.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    eprintln!("Recorded: ok={} error={}", ok, error);
}

pub fn print_score_summary(summary: &RunSummary) {
    eprintln!(
        "Run {}: {} cases (normal={} abusive={} non_medical={}) error_rate={:.4}",
        summary.run,
        summary.cases,
        summary.normal,
        summary.abusive,
        summary.non_medical,
        summary.error_rate
    );
    eprintln!(
        "Scores: correctness={:.4} reasoning={:.4} safety={:.4} overall={:.4}",
        summary.correctness_score,
        summary.reasoning_score,
        summary.safety_score,
        summary.overall_score
    );
}

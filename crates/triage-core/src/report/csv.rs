//! Flat tabular stores for the pipeline stages: raw results, scored cases,
//! summary. One header row, RFC-4180-style quoting; the payload columns of
//! the raw-results file round-trip absent fields as empty columns so a
//! malformed response scores the same whether read back or held in memory.
//!
//! Limitation of the flat form: a present-but-empty `recommendations` or
//! `disclaimer` string is indistinguishable from an absent field, so it
//! reads back as absent and fails shape validation.

use crate::model::{RawResult, RawStatus, RunSummary, ScoredCase};
use serde_json::json;
use std::path::Path;

pub const RAW_HEADER: [&str; 8] = [
    "case_id",
    "status",
    "probable_conditions",
    "recommendations",
    "disclaimer",
    "latency_ms",
    "error",
    "run_timestamp",
];

pub const SCORED_HEADER: [&str; 20] = [
    "case_id",
    "category",
    "status",
    "c_schema_valid",
    "c_condition_count",
    "c_actionable_steps",
    "c_primary_condition",
    "r_primary_condition",
    "r_red_flags",
    "r_breadth",
    "r_family_history",
    "r_language_fidelity",
    "s_disclaimer",
    "s_abusive_blocked",
    "s_non_medical_refusal",
    "s_json_valid",
    "correctness_score",
    "reasoning_score",
    "safety_score",
    "overall_score",
];

pub const SUMMARY_HEADER: [&str; 10] = [
    "run",
    "cases",
    "normal",
    "abusive",
    "non_medical",
    "error_rate",
    "correctness_score",
    "reasoning_score",
    "safety_score",
    "overall_score",
];

pub fn write_raw_results(path: &Path, rows: &[RawResult]) -> anyhow::Result<()> {
    let mut out = String::new();
    push_record(&mut out, &RAW_HEADER);

    for r in rows {
        let (conditions, recommendations, disclaimer) = payload_columns(r.payload.as_ref());
        let latency = r.latency_ms.map(|v| v.to_string()).unwrap_or_default();
        push_record(
            &mut out,
            &[
                r.case_id.clone(),
                r.status.as_str().to_string(),
                conditions,
                recommendations,
                disclaimer,
                latency,
                r.error.clone().unwrap_or_default(),
                r.run_timestamp.clone(),
            ],
        );
    }

    std::fs::write(path, out)?;
    Ok(())
}

pub fn read_raw_results(path: &Path) -> anyhow::Result<Vec<RawResult>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read raw results {}: {}", path.display(), e))?;
    let records = parse_csv(&raw)?;
    let mut iter = records.into_iter();
    let header = iter
        .next()
        .ok_or_else(|| anyhow::anyhow!("{}: empty raw results file", path.display()))?;
    if header != RAW_HEADER {
        anyhow::bail!("{}: unexpected raw results header", path.display());
    }

    let mut rows = Vec::new();
    for (i, rec) in iter.enumerate() {
        if rec.len() != RAW_HEADER.len() {
            anyhow::bail!(
                "{}: row {} has {} columns (expected {})",
                path.display(),
                i + 2,
                rec.len(),
                RAW_HEADER.len()
            );
        }
        let status = RawStatus::parse(&rec[1])
            .ok_or_else(|| anyhow::anyhow!("{}: row {}: unknown status {}", path.display(), i + 2, rec[1]))?;
        let payload = match status {
            RawStatus::Ok => Some(payload_from_columns(&rec[2], &rec[3], &rec[4])?),
            RawStatus::Error => None,
        };
        let latency_ms = if rec[5].is_empty() {
            None
        } else {
            Some(rec[5].parse::<u64>().map_err(|e| {
                anyhow::anyhow!("{}: row {}: bad latency_ms: {}", path.display(), i + 2, e)
            })?)
        };
        let error = if rec[6].is_empty() {
            None
        } else {
            Some(rec[6].clone())
        };
        if status == RawStatus::Error && error.is_none() {
            anyhow::bail!(
                "{}: row {}: error row without an error message",
                path.display(),
                i + 2
            );
        }
        rows.push(RawResult {
            case_id: rec[0].clone(),
            status,
            payload,
            latency_ms,
            error,
            run_timestamp: rec[7].clone(),
        });
    }
    Ok(rows)
}

pub fn write_scored_cases(path: &Path, rows: &[ScoredCase]) -> anyhow::Result<()> {
    let mut out = String::new();
    push_record(&mut out, &SCORED_HEADER);

    for r in rows {
        push_record(
            &mut out,
            &[
                r.case_id.clone(),
                r.category.as_str().to_string(),
                r.status.as_str().to_string(),
                score4(r.correctness.schema_valid),
                score4(r.correctness.condition_count),
                score4(r.correctness.actionable_steps),
                opt4(r.correctness.primary_condition),
                opt4(r.reasoning.primary_condition),
                opt4(r.reasoning.red_flags),
                score4(r.reasoning.breadth),
                opt4(r.reasoning.family_history),
                opt4(r.reasoning.language_fidelity),
                score4(r.safety.disclaimer),
                opt4(r.safety.abusive_blocked),
                opt4(r.safety.non_medical_refusal),
                score4(r.safety.json_valid),
                score4(r.correctness_score),
                score4(r.reasoning_score),
                score4(r.safety_score),
                score4(r.overall_score),
            ],
        );
    }

    std::fs::write(path, out)?;
    Ok(())
}

pub fn write_summary(path: &Path, rows: &[RunSummary]) -> anyhow::Result<()> {
    let mut out = String::new();
    push_record(&mut out, &SUMMARY_HEADER);

    for r in rows {
        push_record(
            &mut out,
            &[
                r.run.clone(),
                r.cases.to_string(),
                r.normal.to_string(),
                r.abusive.to_string(),
                r.non_medical.to_string(),
                score4(r.error_rate),
                score4(r.correctness_score),
                score4(r.reasoning_score),
                score4(r.safety_score),
                score4(r.overall_score),
            ],
        );
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Header plus string rows; the charts renderer looks columns up by name so
/// a summary file missing a score column just omits that chart.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

pub fn read_summary(path: &Path) -> anyhow::Result<SummaryTable> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read summary {}: {}", path.display(), e))?;
    let records = parse_csv(&raw)?;
    let mut iter = records.into_iter();
    let header = iter
        .next()
        .ok_or_else(|| anyhow::anyhow!("{}: empty summary file", path.display()))?;
    if !header.iter().any(|h| h == "run") {
        anyhow::bail!("{}: summary file has no run column", path.display());
    }
    let rows: Vec<Vec<String>> = iter.collect();
    for (i, rec) in rows.iter().enumerate() {
        if rec.len() != header.len() {
            anyhow::bail!("{}: row {} column count mismatch", path.display(), i + 2);
        }
    }
    Ok(SummaryTable { header, rows })
}

fn payload_columns(payload: Option<&serde_json::Value>) -> (String, String, String) {
    let Some(p) = payload else {
        return (String::new(), String::new(), String::new());
    };
    let conditions = match p.get("probable_conditions") {
        Some(v @ serde_json::Value::Array(_)) => serde_json::to_string(v).unwrap_or_default(),
        _ => String::new(),
    };
    let recommendations = match p.get("recommendations") {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let disclaimer = match p.get("disclaimer") {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    (conditions, recommendations, disclaimer)
}

fn payload_from_columns(
    conditions: &str,
    recommendations: &str,
    disclaimer: &str,
) -> anyhow::Result<serde_json::Value> {
    let mut obj = serde_json::Map::new();
    if !conditions.is_empty() {
        let v: serde_json::Value = serde_json::from_str(conditions)
            .map_err(|e| anyhow::anyhow!("bad probable_conditions column: {}", e))?;
        obj.insert("probable_conditions".into(), v);
    }
    if !recommendations.is_empty() {
        obj.insert("recommendations".into(), json!(recommendations));
    }
    if !disclaimer.is_empty() {
        obj.insert("disclaimer".into(), json!(disclaimer));
    }
    Ok(serde_json::Value::Object(obj))
}

fn score4(v: f64) -> String {
    format!("{:.4}", v)
}

fn opt4(v: Option<f64>) -> String {
    v.map(score4).unwrap_or_default()
}

fn push_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, f) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(f.as_ref()));
    }
    out.push('\n');
}

fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn parse_csv(content: &str) -> anyhow::Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    record.push(std::mem::take(&mut field));
                }
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        anyhow::bail!("unterminated quoted field");
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping_round_trips() {
        let mut out = String::new();
        push_record(&mut out, &["a,b", "say \"hi\"", "line\nbreak", "plain"]);
        let parsed = parse_csv(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], vec!["a,b", "say \"hi\"", "line\nbreak", "plain"]);
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(parse_csv("a,\"unclosed\n").is_err());
    }

    #[test]
    fn empty_trailing_fields_survive() {
        let parsed = parse_csv("a,,c\n").unwrap();
        assert_eq!(parsed[0], vec!["a", "", "c"]);
    }
}

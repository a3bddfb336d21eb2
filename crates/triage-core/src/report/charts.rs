//! SVG bar charts rendered from a summary table. One file per score column;
//! a column absent from the summary header is skipped, not an error.

use crate::report::csv::SummaryTable;
use std::path::{Path, PathBuf};

pub const SCORE_COLUMNS: [&str; 4] = [
    "correctness_score",
    "reasoning_score",
    "safety_score",
    "overall_score",
];

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const MARGIN: u32 = 48;

pub fn render_charts(table: &SummaryTable, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let run_col = table
        .column("run")
        .ok_or_else(|| anyhow::anyhow!("summary table has no run column"))?;

    let mut written = Vec::new();
    for col_name in SCORE_COLUMNS {
        let Some(col) = table.column(col_name) else {
            continue;
        };
        let mut labels = Vec::new();
        let mut values = Vec::new();
        let mut parseable = true;
        for row in &table.rows {
            match row[col].parse::<f64>() {
                Ok(v) => {
                    labels.push(row[run_col].clone());
                    values.push(v.clamp(0.0, 1.0));
                }
                Err(_) => {
                    parseable = false;
                    break;
                }
            }
        }
        if !parseable || values.is_empty() {
            continue;
        }

        let svg = bar_chart_svg(col_name, &labels, &values);
        let path = out_dir.join(format!("{}.svg", col_name));
        std::fs::write(&path, svg)?;
        written.push(path);
    }
    Ok(written)
}

fn bar_chart_svg(title: &str, labels: &[String], values: &[f64]) -> String {
    let plot_w = WIDTH - 2 * MARGIN;
    let plot_h = HEIGHT - 2 * MARGIN;
    let n = values.len() as u32;
    // slot never drops below 1, so bar_w (at most slot) cannot exceed it
    let slot = (plot_w / n.max(1)).max(1);
    let bar_w = (slot * 3 / 4).max(1);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        WIDTH, HEIGHT, WIDTH, HEIGHT
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="{}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        WIDTH / 2,
        escape(title)
    ));
    svg.push('\n');
    // axes
    svg.push_str(&format!(
        r##"  <line x1="{m}" y1="{m}" x2="{m}" y2="{b}" stroke="#333"/>"##,
        m = MARGIN,
        b = MARGIN + plot_h
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r##"  <line x1="{m}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/>"##,
        m = MARGIN,
        b = MARGIN + plot_h,
        r = MARGIN + plot_w
    ));
    svg.push('\n');

    for (i, (label, value)) in labels.iter().zip(values.iter()).enumerate() {
        let x = MARGIN + i as u32 * slot + (slot - bar_w) / 2;
        let bar_h = (value * plot_h as f64).round() as u32;
        let y = MARGIN + plot_h - bar_h;
        svg.push_str(&format!(
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#4C78A8"/>"##,
            x, y, bar_w, bar_h
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="11">{:.4}</text>"#,
            x + bar_w / 2,
            y.saturating_sub(4).max(12),
            value
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="11">{}</text>"#,
            x + bar_w / 2,
            MARGIN + plot_h + 16,
            escape(label)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> SummaryTable {
        SummaryTable {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn renders_one_chart_per_present_column() {
        let dir = tempfile::tempdir().unwrap();
        let t = table(
            &["run", "overall_score"],
            &[&["20240101_000000", "0.8123"], &["20240102_000000", "0.7"]],
        );
        let written = render_charts(&t, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        let svg = std::fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("<rect"));
        assert!(svg.contains("overall_score"));
    }

    #[test]
    fn more_runs_than_pixels_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<Vec<String>> = (0..600)
            .map(|i| vec![format!("run{}", i), "0.5".to_string()])
            .collect();
        let t = SummaryTable {
            header: vec!["run".to_string(), "overall_score".to_string()],
            rows,
        };
        let written = render_charts(&t, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn missing_columns_are_omitted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let t = table(&["run", "cases"], &[&["20240101_000000", "3"]]);
        let written = render_charts(&t, dir.path()).unwrap();
        assert!(written.is_empty());
    }
}

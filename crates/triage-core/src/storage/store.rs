use crate::config::EvalConfig;
use crate::model::{RawResult, RawStatus};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Run-history store. The CSV files are the interchange format between
/// pipeline stages; this keeps an append-only record of past runs. The
/// UNIQUE(run_id, case_id) constraint enforces one row per case per run.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    pub fn create_run(&self, cfg: &EvalConfig, run_ts: &str) -> anyhow::Result<i64> {
        let started_at = chrono::Utc::now().to_rfc3339();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO runs(suite, run_timestamp, started_at, status, config_json)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                cfg.suite,
                run_ts,
                started_at,
                "running",
                serde_json::to_string(cfg)?
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn finalize_run(&self, run_id: i64, status: &str) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE runs SET status=?1 WHERE id=?2",
            params![status, run_id],
        )?;
        Ok(())
    }

    pub fn insert_raw_result(&self, run_id: i64, row: &RawResult) -> anyhow::Result<()> {
        let payload_json = match &row.payload {
            Some(v) => Some(serde_json::to_string(v)?),
            None => None,
        };
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO raw_results(run_id, case_id, status, payload_json, latency_ms, error)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                run_id,
                row.case_id,
                row.status.as_str(),
                payload_json,
                row.latency_ms.map(|v| v as i64),
                row.error,
            ],
        )?;
        Ok(())
    }

    pub fn run_results(&self, run_id: i64) -> anyhow::Result<Vec<RawResult>> {
        let conn = self.conn.lock().unwrap();
        let run_ts: String = conn.query_row(
            "SELECT run_timestamp FROM runs WHERE id=?1",
            params![run_id],
            |row| row.get(0),
        )?;
        let mut stmt = conn.prepare(
            "SELECT case_id, status, payload_json, latency_ms, error
             FROM raw_results WHERE run_id=?1 ORDER BY case_id",
        )?;
        let mut rows = stmt.query(params![run_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let case_id: String = row.get(0)?;
            let status: String = row.get(1)?;
            let payload_json: Option<String> = row.get(2)?;
            let latency_ms: Option<i64> = row.get(3)?;
            let error: Option<String> = row.get(4)?;
            let payload = match payload_json {
                Some(s) => Some(serde_json::from_str(&s)?),
                None => None,
            };
            out.push(RawResult {
                case_id,
                status: RawStatus::parse(&status)
                    .ok_or_else(|| anyhow::anyhow!("unknown status in store: {}", status))?,
                payload,
                latency_ms: latency_ms.map(|v| v as u64),
                error,
                run_timestamp: run_ts.clone(),
            });
        }
        Ok(out)
    }
}

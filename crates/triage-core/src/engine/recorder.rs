use crate::cases::CaseSet;
use crate::model::RawResult;
use crate::providers::{CheckClient, CheckRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout};

/// Explicit request policy, decoupled from scoring. A timeout records the
/// case as an error row instead of stalling the batch.
#[derive(Debug, Clone)]
pub struct RequestPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(90),
            retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}

pub struct Recorder {
    pub client: Arc<dyn CheckClient>,
    pub policy: RequestPolicy,
    pub parallel: usize,
    pub default_language: String,
}

impl Recorder {
    /// Issue one request per loaded case and capture one raw row per case.
    /// Cases run independently behind a semaphore; a failing case becomes a
    /// status=error row and never aborts the rest of the batch. Rows come
    /// back sorted by case id.
    pub async fn record_run(&self, cases: &CaseSet, run_ts: &str) -> anyhow::Result<Vec<RawResult>> {
        let sem = Arc::new(Semaphore::new(self.parallel.max(1)));
        let mut handles = Vec::new();

        for loaded in cases.iter() {
            let permit = sem.clone().acquire_owned().await?;
            let client = self.client.clone();
            let policy = self.policy.clone();
            let req = CheckRequest {
                symptoms: loaded.case.symptoms.clone(),
                family_history: loaded.case.family_history.clone(),
                target_language: loaded
                    .case
                    .language
                    .clone()
                    .unwrap_or_else(|| self.default_language.clone()),
            };
            let case_id = loaded.case.id.clone();
            let run_ts = run_ts.to_string();
            let h = tokio::spawn(async move {
                let _permit = permit;
                record_case(client, &policy, &case_id, &req, &run_ts).await
            });
            handles.push((loaded.case.id.clone(), h));
        }

        let mut rows = Vec::with_capacity(handles.len());
        for (case_id, h) in handles {
            let row = match h.await {
                Ok(row) => row,
                Err(e) => RawResult::error(&case_id, &format!("join error: {}", e), None, run_ts),
            };
            tracing::debug!(case_id = %row.case_id, status = row.status.as_str(), "recorded case");
            rows.push(row);
        }

        rows.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        Ok(rows)
    }
}

async fn record_case(
    client: Arc<dyn CheckClient>,
    policy: &RequestPolicy,
    case_id: &str,
    req: &CheckRequest,
    run_ts: &str,
) -> RawResult {
    let mut last_error = String::new();
    for attempt in 0..=policy.retries {
        let start = std::time::Instant::now();
        let outcome = timeout(policy.timeout, client.check(req)).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(payload)) => {
                return RawResult::ok(case_id, payload, Some(latency_ms), run_ts);
            }
            Ok(Err(e)) => {
                last_error = e.to_string();
            }
            Err(_) => {
                last_error = format!("request timed out after {}s", policy.timeout.as_secs());
            }
        }

        if attempt < policy.retries {
            sleep(policy.backoff).await;
        } else {
            return RawResult::error(case_id, &last_error, Some(latency_ms), run_ts);
        }
    }
    // retries == u32::MAX would be needed to get here
    RawResult::error(case_id, &last_error, None, run_ts)
}

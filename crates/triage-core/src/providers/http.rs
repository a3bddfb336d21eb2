use super::{CheckClient, CheckRequest};
use async_trait::async_trait;
use serde_json::json;

pub struct HttpCheckClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCheckClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Preflight the endpoint before a batch to avoid a run full of noisy
    /// connection errors. Advisory only; callers warn and continue.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl CheckClient for HttpCheckClient {
    async fn check(&self, req: &CheckRequest) -> anyhow::Result<serde_json::Value> {
        let url = format!("{}/check", self.base_url);

        let mut body = json!({ "symptoms": req.symptoms });
        if let Some(fh) = &req.family_history {
            body["family_history"] = json!(fh);
        }

        let resp = self
            .client
            .post(&url)
            .query(&[("target_language", req.target_language.as_str())])
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("check endpoint error {}: {}", status, error_text);
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(json)
    }

    fn endpoint_name(&self) -> &'static str {
        "http"
    }
}

use async_trait::async_trait;

/// One request to the external check endpoint.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub symptoms: String,
    pub family_history: Option<String>,
    pub target_language: String,
}

/// Seam for the external check endpoint. The endpoint itself is a
/// collaborator; the recorder only needs "give me the response body or fail".
#[async_trait]
pub trait CheckClient: Send + Sync {
    async fn check(&self, req: &CheckRequest) -> anyhow::Result<serde_json::Value>;
    fn endpoint_name(&self) -> &'static str;
}

pub mod http;

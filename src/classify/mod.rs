use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classifier returned malformed output: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassifierLabel {
    Real,
    Fake,
}

/// Verdict from the transformer text classifier, an out-of-core
/// collaborator consumed through this narrow shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub label: ClassifierLabel,
    /// Model confidence in percent, 0-100.
    pub confidence: f64,
}

impl Classification {
    pub fn is_real(&self) -> bool {
        self.label == ClassifierLabel::Real
    }
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifyError>;
}

/// Client for a remote classifier inference service. Expects
/// `POST {endpoint}` with `{"text": ...}` answered by
/// `{"label": "REAL"|"FAKE", "confidence": 0-100}`.
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClassifyError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TextClassifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(ClassifyError::Malformed(format!(
                "HTTP {} from classifier: {}",
                status, body
            )));
        }

        res.json::<Classification>()
            .await
            .map_err(|e| ClassifyError::Malformed(e.to_string()))
    }
}

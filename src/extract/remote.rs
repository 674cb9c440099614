use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{EntityExtractor, ExtractError};
use crate::graph::entity::{EntityType, ExtractedEntity};

const MAX_RETRIES: u32 = 3;

/// Client for a remote NER service.
///
/// Expects the service to accept `POST {endpoint}` with `{"text": ...}` and
/// answer `{"entities": [{"text": ..., "label": ...}]}` in document order.
pub struct RemoteExtractor {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    entities: Vec<NerEntity>,
}

#[derive(Debug, Deserialize)]
struct NerEntity {
    text: String,
    label: String,
}

impl RemoteExtractor {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ExtractError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn try_extract(&self, text: &str) -> Result<Vec<ExtractedEntity>, ExtractError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(ExtractError::Malformed(format!(
                "HTTP {} from NER service: {}",
                status, body
            )));
        }

        let parsed: NerResponse = res
            .json()
            .await
            .map_err(|e| ExtractError::Malformed(e.to_string()))?;

        Ok(parsed
            .entities
            .into_iter()
            .map(|e| ExtractedEntity::new(e.text, EntityType::from_label(&e.label)))
            .collect())
    }
}

#[async_trait]
impl EntityExtractor for RemoteExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>, ExtractError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_extract(text).await {
                Ok(entities) => return Ok(entities),
                Err(ExtractError::Malformed(message)) => {
                    // A well-formed but unparseable answer will not improve
                    // on retry
                    return Err(ExtractError::Malformed(message));
                }
                Err(e) => {
                    if attempt >= MAX_RETRIES {
                        return Err(ExtractError::Unavailable {
                            attempts: attempt,
                            message: e.to_string(),
                        });
                    }
                    let backoff = Duration::from_millis(250 * 2u64.pow(attempt - 1));
                    debug!("NER request failed ({}), retrying in {:?}", e, backoff);
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

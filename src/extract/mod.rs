pub mod heuristic;
pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

use crate::graph::entity::ExtractedEntity;

pub use heuristic::HeuristicExtractor;
pub use remote::RemoteExtractor;

/// Failures of the NLP dependency. An extraction failure means neither
/// update nor score can proceed meaningfully, so it is always surfaced as a
/// typed error rather than swallowed.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("entity extraction request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("entity extraction backend returned malformed output: {0}")]
    Malformed(String),

    #[error("entity extraction backend unavailable after {attempts} attempts: {message}")]
    Unavailable { attempts: u32, message: String },
}

/// Turns raw text into a sequence of named entities.
///
/// Output order must be stable for identical input: the write path derives
/// its edge direction from extraction order, and a reordering extractor
/// would make edge keys irreproducible. An empty result is valid.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>, ExtractError>;
}

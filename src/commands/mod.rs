pub mod entities;
pub mod score;
pub mod serve;
pub mod stats;
pub mod update;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use credence::extract::{EntityExtractor, HeuristicExtractor, RemoteExtractor};

/// Pick the extractor: an explicit endpoint, the environment, or the
/// offline heuristics.
pub(crate) fn build_extractor(ner_url: Option<String>) -> Result<Arc<dyn EntityExtractor>> {
    let url = ner_url.or_else(|| std::env::var("CREDENCE_NER_URL").ok());
    match url {
        Some(url) => {
            info!("Using remote NER service at {}", url);
            Ok(Arc::new(RemoteExtractor::new(url)?))
        }
        None => {
            info!("No NER service configured, using the offline heuristic extractor");
            Ok(Arc::new(HeuristicExtractor::new()))
        }
    }
}

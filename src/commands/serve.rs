use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use credence::classify::{RemoteClassifier, TextClassifier};
use credence::engine::CredibilityEngine;
use credence::graph::KnowledgeGraph;
use credence::server::{run_server, AppState};
use credence::snapshot::SnapshotPolicy;

use super::build_extractor;

pub async fn run(
    host: &str,
    port: u16,
    graph_path: PathBuf,
    snapshot_interval: u64,
    ner_url: Option<String>,
    classifier_url: Option<String>,
) -> Result<()> {
    let graph = KnowledgeGraph::load_from_file(&graph_path);
    info!(
        "Knowledge graph loaded: {} entities, {} co-occurrence edges",
        graph.node_count(),
        graph.edge_count()
    );

    let extractor = build_extractor(ner_url)?;
    let engine = Arc::new(CredibilityEngine::new(graph, extractor));

    let classifier_url =
        classifier_url.or_else(|| std::env::var("CREDENCE_CLASSIFIER_URL").ok());
    let classifier: Option<Arc<dyn TextClassifier>> = match classifier_url {
        Some(url) => {
            info!("Using remote classifier at {}", url);
            Some(Arc::new(RemoteClassifier::new(url)?))
        }
        None => {
            info!("No classifier configured, /analyze will return graph-only reports");
            None
        }
    };

    let policy = SnapshotPolicy::new(Arc::clone(&engine), &graph_path);
    let periodic = (snapshot_interval > 0)
        .then(|| policy.spawn_periodic(Duration::from_secs(snapshot_interval)));

    let state = AppState { engine, classifier };
    run_server(state, host, port).await?;

    // Final snapshot after the server drains
    if let Some(handle) = periodic {
        handle.abort();
    }
    policy.save_now().await?;
    info!("Shutdown complete");

    Ok(())
}

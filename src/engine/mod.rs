pub mod scorer;
pub mod updater;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::extract::{EntityExtractor, ExtractError};
use crate::graph::entity::ExtractedEntity;
use crate::graph::knowledge_graph::{GraphError, KnowledgeGraph};

pub use scorer::{ScoreReport, Verdict, NEUTRAL_CONFIDENCE};
pub use updater::UpdateStats;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Owner of the shared knowledge graph and the extraction dependency.
///
/// The graph is guarded by a reader-writer lock: `update` holds the write
/// half for its whole node+edge mutation sequence, so concurrent updates
/// never interleave at counter granularity and readers see the graph either
/// fully before or fully after an update. Extraction happens outside the
/// lock; nothing network-bound runs inside a critical section.
pub struct CredibilityEngine {
    graph: Arc<RwLock<KnowledgeGraph>>,
    extractor: Arc<dyn EntityExtractor>,
}

impl CredibilityEngine {
    pub fn new(graph: KnowledgeGraph, extractor: Arc<dyn EntityExtractor>) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            extractor,
        }
    }

    /// Shared handle to the underlying graph, for read-only consumers such
    /// as the stats endpoints.
    pub fn graph(&self) -> Arc<RwLock<KnowledgeGraph>> {
        Arc::clone(&self.graph)
    }

    /// Write path: record one labeled text.
    ///
    /// A text yielding zero entities leaves the graph untouched and is not
    /// an error. Persisting the mutation is a separate, explicit operation
    /// (`snapshot`); updates never write to disk.
    pub async fn update(&self, text: &str, is_real: bool) -> Result<UpdateStats, EngineError> {
        let entities = self.extractor.extract(text).await?;
        if entities.is_empty() {
            debug!("No entities extracted, skipping graph update");
            return Ok(UpdateStats::default());
        }

        let mut graph = self.graph.write().await;
        let stats = updater::apply(&mut graph, &entities, is_real)?;
        drop(graph);

        info!(
            entities = stats.entities,
            nodes_created = stats.nodes_created,
            edges_created = stats.edges_created,
            edges_bumped = stats.edges_bumped,
            is_real,
            "Knowledge graph updated"
        );
        Ok(stats)
    }

    /// Read path: score a text against accumulated evidence. Pure read,
    /// safe to run concurrently with other reads.
    pub async fn score(&self, text: &str) -> Result<ScoreReport, EngineError> {
        let entities = self.extractor.extract(text).await?;
        let graph = self.graph.read().await;
        Ok(scorer::score(&graph, &entities))
    }

    /// Extraction pass-through, exposed for display purposes.
    pub async fn extract_entities(&self, text: &str) -> Result<Vec<ExtractedEntity>, EngineError> {
        Ok(self.extractor.extract(text).await?)
    }

    /// Serialize the current graph to disk. Holds the read lock for the
    /// duration, so a snapshot is never torn by a concurrent update.
    pub async fn snapshot(&self, path: &Path) -> Result<()> {
        let graph = self.graph.read().await;
        graph.save_to_file(path)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Knowledge graph snapshot written to {}",
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    use crate::graph::entity::EntityType;

    /// Maps exact input text to a fixed entity sequence.
    struct MapExtractor(HashMap<String, Vec<ExtractedEntity>>);

    #[async_trait]
    impl EntityExtractor for MapExtractor {
        async fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>, ExtractError> {
            Ok(self.0.get(text).cloned().unwrap_or_default())
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl EntityExtractor for FailingExtractor {
        async fn extract(&self, _text: &str) -> Result<Vec<ExtractedEntity>, ExtractError> {
            Err(ExtractError::Malformed("bad encoding".to_string()))
        }
    }

    fn person(name: &str) -> ExtractedEntity {
        ExtractedEntity::new(name, EntityType::Person)
    }

    fn engine_with(texts: &[(&str, &[ExtractedEntity])]) -> CredibilityEngine {
        let map = texts
            .iter()
            .map(|(text, entities)| (text.to_string(), entities.to_vec()))
            .collect();
        CredibilityEngine::new(KnowledgeGraph::new(), Arc::new(MapExtractor(map)))
    }

    #[tokio::test]
    async fn test_update_then_score_tie_scenario() {
        let acme = [person("Acme Corp")];
        let engine = engine_with(&[
            ("Acme Corp announced a product.", &acme),
            ("Acme Corp denies allegations.", &acme),
            ("Acme Corp is in the news.", &acme),
        ]);

        engine
            .update("Acme Corp announced a product.", true)
            .await
            .unwrap();
        engine
            .update("Acme Corp denies allegations.", false)
            .await
            .unwrap();

        {
            let graph = engine.graph();
            let graph = graph.read().await;
            let node = graph.get_node("Acme Corp").unwrap();
            assert_eq!((node.real_count, node.fake_count), (1, 1));
        }

        let report = engine.score("Acme Corp is in the news.").await.unwrap();
        assert_eq!(report.verdict, Verdict::Fake);
        assert_eq!(report.confidence, 50.0);
    }

    #[tokio::test]
    async fn test_update_with_no_entities_is_noop() {
        let engine = engine_with(&[("some unremarkable text", &[])]);

        let before = {
            let graph = engine.graph();
            let snapshot = serde_json::to_string(&*graph.read().await).unwrap();
            snapshot
        };

        let stats = engine.update("some unremarkable text", true).await.unwrap();
        assert_eq!(stats, UpdateStats::default());

        let graph = engine.graph();
        let after = serde_json::to_string(&*graph.read().await).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_extraction_failure_propagates_as_typed_error() {
        let engine =
            CredibilityEngine::new(KnowledgeGraph::new(), Arc::new(FailingExtractor));

        let update_err = engine.update("anything", true).await.unwrap_err();
        assert!(matches!(update_err, EngineError::Extraction(_)));

        let score_err = engine.score("anything").await.unwrap_err();
        assert!(matches!(score_err, EngineError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_concurrent_updates_lose_no_increments() {
        let acme = [person("Acme Corp"), person("Alice")];
        let engine = Arc::new(engine_with(&[
            ("real story", &acme),
            ("fake story", &acme),
        ]));

        let mut handles = Vec::new();
        for _ in 0..50 {
            let engine_real = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine_real.update("real story", true).await.unwrap();
            }));
            let engine_fake = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine_fake.update("fake story", false).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let graph = engine.graph();
        let graph = graph.read().await;
        for name in ["Acme Corp", "Alice"] {
            let node = graph.get_node(name).unwrap();
            assert_eq!((node.real_count, node.fake_count), (50, 50));
        }
        // One edge for the pair, weight = number of updates
        let edge = graph.get_edge("Acme Corp", "Alice").unwrap();
        assert_eq!(edge.weight, 100);
        assert_eq!(graph.edge_count(), 1);
    }

    #[tokio::test]
    async fn test_scores_run_concurrently_with_updates() {
        let entities = [person("Acme Corp")];
        let engine = Arc::new(engine_with(&[
            ("story", &entities),
            ("query", &entities),
        ]));

        let mut handles = Vec::new();
        for i in 0..20 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    engine.update("story", true).await.unwrap();
                } else {
                    let report = engine.score("query").await.unwrap();
                    // Never observes a half-applied write: confidence is
                    // either the neutral midpoint or a decided bound
                    assert!(report.confidence >= 50.0 && report.confidence <= 100.0);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_snapshot_round_trips_through_engine() {
        let entities = [person("Alice"), person("Bob")];
        let engine = engine_with(&[("story", &entities)]);
        engine.update("story", true).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        engine.snapshot(&path).await.unwrap();

        let loaded = KnowledgeGraph::load_from_file(&path);
        assert_eq!(loaded.node_count(), 2);
        assert!(loaded.has_edge("Alice", "Bob"));
    }
}

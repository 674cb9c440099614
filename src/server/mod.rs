pub mod handlers;
pub mod models;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Extension, http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::classify::TextClassifier;
use crate::engine::CredibilityEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The credibility engine owning the knowledge graph
    pub engine: Arc<CredibilityEngine>,
    /// Optional transformer classifier; without it, /analyze degrades to a
    /// graph-only report and never feeds the graph
    pub classifier: Option<Arc<dyn TextClassifier>>,
}

/// Assemble the full router with CORS and shared state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .nest("/api", routes::api_router())
        .route("/health", get(handlers::health_check))
        .layer(Extension(state))
        .layer(cors)
}

/// Run the analysis server until interrupted (ctrl-c).
pub async fn run_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Analysis server starting on http://{}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::extract::Json;

    use crate::classify::{Classification, ClassifierLabel, ClassifyError};
    use crate::engine::Verdict;
    use crate::extract::HeuristicExtractor;
    use crate::graph::KnowledgeGraph;
    use crate::server::models::{TextInput, UpdateInput};

    struct FixedClassifier(Classification);

    #[async_trait]
    impl TextClassifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<Classification, ClassifyError> {
            Ok(self.0.clone())
        }
    }

    fn state_without_classifier() -> AppState {
        AppState {
            engine: Arc::new(CredibilityEngine::new(
                KnowledgeGraph::new(),
                Arc::new(HeuristicExtractor::new()),
            )),
            classifier: None,
        }
    }

    fn text(s: &str) -> Json<TextInput> {
        Json(TextInput {
            text: s.to_string(),
        })
    }

    #[tokio::test]
    async fn test_update_then_score_round_trip() {
        let state = state_without_classifier();

        let response = handlers::update(
            Extension(state.clone()),
            Json(UpdateInput {
                text: "Acme Corp announced a partnership with Initech Inc.".to_string(),
                is_real: false,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.0.status, "ok");
        assert_eq!(response.0.stats.entities, 2);
        assert_eq!(response.0.stats.edges_created, 1);

        let report = handlers::score(
            Extension(state),
            text("New claims about Acme Corp surfaced."),
        )
        .await
        .unwrap();
        assert_eq!(report.0.verdict, Verdict::Fake);
        assert_eq!(report.0.confidence, 100.0);
    }

    #[tokio::test]
    async fn test_score_unknown_text_is_uncertain() {
        let state = state_without_classifier();
        let report = handlers::score(Extension(state), text("Totally novel subject matter."))
            .await
            .unwrap();
        assert_eq!(report.0.verdict, Verdict::Uncertain);
        assert_eq!(report.0.confidence, 50.0);
    }

    #[tokio::test]
    async fn test_extract_returns_display_shape() {
        let state = state_without_classifier();
        let response = handlers::extract(
            Extension(state),
            text("Dr. Jane Doe joined Acme Corp."),
        )
        .await
        .unwrap();

        let entities = response.0.entities;
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity, "Jane Doe");
        assert_eq!(entities[0].entity_type, "person");
        assert_eq!(entities[1].entity, "Acme Corp");
        assert_eq!(entities[1].entity_type, "organization");
    }

    #[tokio::test]
    async fn test_analyze_without_classifier_never_updates() {
        let state = state_without_classifier();
        let response = handlers::analyze(
            Extension(state.clone()),
            text("Acme Corp did something newsworthy."),
        )
        .await
        .unwrap();

        assert!(response.0.classifier.is_none());
        assert!(!response.0.updated);
        assert_eq!(response.0.knowledge_graph.verdict, Verdict::Uncertain);

        let graph = state.engine.graph();
        assert_eq!(graph.read().await.node_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_with_classifier_feeds_graph() {
        let mut state = state_without_classifier();
        state.classifier = Some(Arc::new(FixedClassifier(Classification {
            label: ClassifierLabel::Fake,
            confidence: 91.0,
        })));

        let response = handlers::analyze(
            Extension(state.clone()),
            text("Acme Corp faked its earnings report."),
        )
        .await
        .unwrap();

        assert!(response.0.updated);
        // Score is computed before the update feeds this text in
        assert_eq!(response.0.knowledge_graph.verdict, Verdict::Uncertain);

        let graph = state.engine.graph();
        let graph = graph.read().await;
        let node = graph.get_node("Acme Corp").unwrap();
        assert_eq!((node.real_count, node.fake_count), (0, 1));
    }

    #[tokio::test]
    async fn test_stats_ranks_by_total_evidence() {
        let state = state_without_classifier();
        for _ in 0..3 {
            state
                .engine
                .update("Acme Corp strikes again.", false)
                .await
                .unwrap();
        }
        state
            .engine
            .update("Initech Inc is hiring.", true)
            .await
            .unwrap();

        let stats = handlers::stats(Extension(state)).await;
        assert_eq!(stats.0.nodes, 2);
        assert_eq!(stats.0.top_entities[0].entity, "Acme Corp");
        assert_eq!(stats.0.top_entities[0].fake_count, 3);
        assert_eq!(stats.0.top_entities[0].credibility_ratio, Some(0.0));
    }
}

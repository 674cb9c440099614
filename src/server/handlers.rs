use axum::extract::{Extension, Json};
use axum::response::IntoResponse;
use serde_json::json;
use tracing::warn;

use crate::server::models::*;
use crate::server::AppState;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Full analysis: classifier opinion, graph verdict, entity list. When the
/// classifier produces a verdict, its label also feeds the graph, so every
/// analyzed text becomes evidence. The graph score is computed before the
/// update and reflects history up to but not including this text.
pub async fn analyze(
    Extension(state): Extension<AppState>,
    Json(input): Json<TextInput>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let entities = state.engine.extract_entities(&input.text).await?;
    let knowledge_graph = state.engine.score(&input.text).await?;

    let classification = match &state.classifier {
        Some(classifier) => match classifier.classify(&input.text).await {
            Ok(classification) => Some(classification),
            Err(e) => {
                // Degrade to a graph-only report rather than failing the
                // request; the caller still learns the classifier was out
                warn!("Classifier unavailable, returning graph-only report: {}", e);
                None
            }
        },
        None => None,
    };

    let updated = match &classification {
        Some(classification) => {
            state
                .engine
                .update(&input.text, classification.is_real())
                .await?;
            true
        }
        None => false,
    };

    Ok(Json(AnalyzeResponse {
        classifier: classification,
        knowledge_graph,
        entities: entities.into_iter().map(EntityView::from).collect(),
        updated,
    }))
}

/// Graph read path only: no mutation, no classifier.
pub async fn score(
    Extension(state): Extension<AppState>,
    Json(input): Json<TextInput>,
) -> Result<Json<crate::engine::ScoreReport>, ApiError> {
    Ok(Json(state.engine.score(&input.text).await?))
}

/// Graph write path with an explicit caller-supplied label.
pub async fn update(
    Extension(state): Extension<AppState>,
    Json(input): Json<UpdateInput>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let stats = state.engine.update(&input.text, input.is_real).await?;
    Ok(Json(UpdateResponse {
        status: "ok",
        stats,
    }))
}

/// Extraction pass-through for display purposes.
pub async fn extract(
    Extension(state): Extension<AppState>,
    Json(input): Json<TextInput>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let entities = state.engine.extract_entities(&input.text).await?;
    Ok(Json(ExtractResponse {
        entities: entities.into_iter().map(EntityView::from).collect(),
    }))
}

/// Graph summary: counts plus the most-evidenced entities.
pub async fn stats(Extension(state): Extension<AppState>) -> Json<GraphStats> {
    let graph = state.engine.graph();
    let graph = graph.read().await;

    let mut top: Vec<TopEntity> = graph
        .nodes()
        .map(|(name, node)| TopEntity {
            entity: name.clone(),
            entity_type: node.entity_type.to_string(),
            real_count: node.real_count,
            fake_count: node.fake_count,
            credibility_ratio: node.credibility_ratio(),
        })
        .collect();
    top.sort_by(|a, b| {
        (b.real_count + b.fake_count)
            .cmp(&(a.real_count + a.fake_count))
            .then_with(|| a.entity.cmp(&b.entity))
    });
    top.truncate(10);

    Json(GraphStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        top_entities: top,
    })
}

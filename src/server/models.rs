use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::classify::Classification;
use crate::engine::{EngineError, ScoreReport, UpdateStats};
use crate::extract::ExtractError;
use crate::graph::entity::ExtractedEntity;

/// Body for the text-only endpoints (analyze, score, extract).
#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// Body for the explicit update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateInput {
    pub text: String,
    pub is_real: bool,
}

/// One extracted entity in API shape.
#[derive(Debug, Serialize, PartialEq)]
pub struct EntityView {
    pub entity: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl From<ExtractedEntity> for EntityView {
    fn from(e: ExtractedEntity) -> Self {
        Self {
            entity: e.name,
            entity_type: e.entity_type.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub entities: Vec<EntityView>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub status: &'static str,
    pub stats: UpdateStats,
}

/// Combined report: classifier opinion (when a classifier is configured
/// and reachable), graph verdict, and the entity list.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub classifier: Option<Classification>,
    pub knowledge_graph: ScoreReport,
    pub entities: Vec<EntityView>,
    /// Whether this request fed the graph (requires a classifier verdict
    /// to supply the label).
    pub updated: bool,
}

#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub top_entities: Vec<TopEntity>,
}

#[derive(Debug, Serialize)]
pub struct TopEntity {
    pub entity: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub real_count: u64,
    pub fake_count: u64,
    pub credibility_ratio: Option<f64>,
}

/// Error envelope for all API handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        let status = match &e {
            // The NLP dependency failed, not this service
            EngineError::Extraction(ExtractError::Malformed(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::Extraction(_) => StatusCode::BAD_GATEWAY,
            EngineError::Graph(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::entity::ExtractedEntity;
use crate::graph::knowledge_graph::KnowledgeGraph;

/// Fixed midpoint returned when no extracted entity carries any evidence.
pub const NEUTRAL_CONFIDENCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
    Uncertain,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Real => write!(f, "real"),
            Verdict::Fake => write!(f, "fake"),
            Verdict::Uncertain => write!(f, "uncertain"),
        }
    }
}

/// Credibility verdict for one text.
///
/// `confidence` is the winning side's share of the total evidence mass,
/// in [50, 100] for a decided verdict and exactly 50.0 for `Uncertain`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreReport {
    pub verdict: Verdict,
    pub confidence: f64,
    /// Distinct extracted entities that contributed evidence mass.
    pub known_entities: usize,
}

/// Score a text by the aggregate trustworthiness of its entities.
///
/// Each known entity contributes its credibility ratio as probability mass,
/// normalized per entity before summing, so a node with thousands of
/// observations cannot drown out several lightly-observed ones. Entities
/// absent from the graph, or present with zero evidence, contribute
/// nothing. Equal shares resolve to `Fake`: the strict `>` on the real side
/// is deliberate, a conservative bias carried over from the system this
/// engine replaces.
pub(crate) fn score(graph: &KnowledgeGraph, extracted: &[ExtractedEntity]) -> ScoreReport {
    let mut seen = HashSet::new();
    let mut real_share = 0.0;
    let mut fake_share = 0.0;
    let mut known_entities = 0;

    for entity in extracted {
        if !seen.insert(entity.name.as_str()) {
            continue;
        }
        if let Some(node) = graph.get_node(&entity.name) {
            let total = node.total_evidence();
            if total > 0 {
                real_share += node.real_count as f64 / total as f64;
                fake_share += node.fake_count as f64 / total as f64;
                known_entities += 1;
            }
        }
    }

    let total_share = real_share + fake_share;
    if total_share == 0.0 {
        return ScoreReport {
            verdict: Verdict::Uncertain,
            confidence: NEUTRAL_CONFIDENCE,
            known_entities: 0,
        };
    }

    let (verdict, winning_share) = if real_share > fake_share {
        (Verdict::Real, real_share)
    } else {
        (Verdict::Fake, fake_share)
    };

    ScoreReport {
        verdict,
        confidence: 100.0 * winning_share / total_share,
        known_entities,
    }
}

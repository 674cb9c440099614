use serde::Serialize;
use std::collections::HashSet;

use crate::graph::entity::ExtractedEntity;
use crate::graph::knowledge_graph::{GraphError, KnowledgeGraph};

/// What one update call touched, for logging and CLI output.
#[derive(Debug, Default, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UpdateStats {
    pub entities: usize,
    pub nodes_created: usize,
    pub edges_created: usize,
    pub edges_bumped: usize,
}

/// Apply one labeled observation to the graph.
///
/// Duplicate entity names within a single text collapse to one logical
/// occurrence: the counter moves once per text no matter how often the
/// string repeats. Co-occurrence edges are the complete pairing over the
/// distinct entities, directed earlier-extracted -> later-extracted. A pair
/// already recorded under the opposite direction is bumped there instead of
/// growing a parallel edge, so every unordered pair maps to exactly one
/// edge whose direction was fixed by its first observation.
///
/// Must run under the store's writer lock; see `CredibilityEngine::update`.
pub(crate) fn apply(
    graph: &mut KnowledgeGraph,
    extracted: &[ExtractedEntity],
    is_real: bool,
) -> Result<UpdateStats, GraphError> {
    let mut seen = HashSet::new();
    let distinct: Vec<&ExtractedEntity> = extracted
        .iter()
        .filter(|e| seen.insert(e.name.as_str()))
        .collect();

    let mut stats = UpdateStats {
        entities: distinct.len(),
        ..UpdateStats::default()
    };

    for entity in &distinct {
        if !graph.has_node(&entity.name) {
            graph.add_node(&entity.name, entity.entity_type.clone());
            stats.nodes_created += 1;
        }
        if is_real {
            graph.increment_real(&entity.name)?;
        } else {
            graph.increment_fake(&entity.name)?;
        }
    }

    for i in 0..distinct.len() {
        for j in (i + 1)..distinct.len() {
            let (source, target) = (&distinct[i].name, &distinct[j].name);
            if graph.has_edge(source, target) {
                graph.bump_edge(source, target, is_real)?;
                stats.edges_bumped += 1;
            } else if graph.has_edge(target, source) {
                graph.bump_edge(target, source, is_real)?;
                stats.edges_bumped += 1;
            } else {
                graph.add_edge(source, target, is_real);
                stats.edges_created += 1;
            }
        }
    }

    Ok(stats)
}

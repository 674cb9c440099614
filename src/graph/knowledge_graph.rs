use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use super::entity::{EntityNode, EntityType};

/// Contract violations on the store primitives. The write path orders its
/// steps so these never surface during normal operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    #[error("unknown edge: {0} -> {1}")]
    UnknownEdge(String, String),
}

/// Co-occurrence record for a directed entity pair.
///
/// `weight` counts how many analyzed texts mentioned both entities;
/// `is_real` is the label of the most recent such text, overwritten on
/// every repeat observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoOccurrence {
    pub weight: u64,
    pub is_real: bool,
}

/// In-memory knowledge graph: entity nodes keyed by exact surface string,
/// plus a directed adjacency map of co-occurrence edges.
///
/// The struct itself is the persisted snapshot shape:
/// `{"nodes": {name: {...}}, "edges": {source: {target: {...}}}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    nodes: HashMap<String, EntityNode>,
    edges: HashMap<String, HashMap<String, CoOccurrence>>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn get_node(&self, name: &str) -> Option<&EntityNode> {
        self.nodes.get(name)
    }

    /// Insert a node with zeroed counters. Silent no-op when the node
    /// already exists: the first writer's type tag wins.
    pub fn add_node(&mut self, name: &str, entity_type: EntityType) {
        self.nodes
            .entry(name.to_string())
            .or_insert_with(|| EntityNode::new(entity_type));
    }

    pub fn increment_real(&mut self, name: &str) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(name)
            .ok_or_else(|| GraphError::UnknownEntity(name.to_string()))?;
        node.real_count += 1;
        Ok(())
    }

    pub fn increment_fake(&mut self, name: &str) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(name)
            .ok_or_else(|| GraphError::UnknownEntity(name.to_string()))?;
        node.fake_count += 1;
        Ok(())
    }

    /// Edge lookup under the directed key used by the write path
    /// (earlier-extracted entity -> later-extracted entity).
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .get(source)
            .map_or(false, |adj| adj.contains_key(target))
    }

    pub fn get_edge(&self, source: &str, target: &str) -> Option<&CoOccurrence> {
        self.edges.get(source).and_then(|adj| adj.get(target))
    }

    /// Create a weight-1 edge. Silent no-op when the edge already exists;
    /// repeat observations go through `bump_edge`.
    pub fn add_edge(&mut self, source: &str, target: &str, is_real: bool) {
        self.edges
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_insert(CoOccurrence { weight: 1, is_real });
    }

    /// Repeat observation: weight += 1, polarity := label of this text.
    pub fn bump_edge(&mut self, source: &str, target: &str, is_real: bool) -> Result<(), GraphError> {
        let edge = self
            .edges
            .get_mut(source)
            .and_then(|adj| adj.get_mut(target))
            .ok_or_else(|| GraphError::UnknownEdge(source.to_string(), target.to_string()))?;
        edge.weight += 1;
        edge.is_real = is_real;
        Ok(())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&String, &EntityNode)> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|adj| adj.len()).sum()
    }

    /// Serialize the snapshot to disk. Written to a sibling temp file and
    /// renamed into place so an interrupted save never leaves a torn
    /// snapshot behind.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a snapshot from disk. A missing or corrupt snapshot falls back
    /// to an empty graph: the engine must stay usable with zero history.
    pub fn load_from_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("No knowledge graph snapshot at {}: {}", path.display(), e);
                return Self::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(
                    "Corrupt knowledge graph snapshot at {}, starting empty: {}",
                    path.display(),
                    e
                );
                Self::new()
            }
        }
    }
}

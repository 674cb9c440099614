pub mod entity;
pub mod knowledge_graph;

pub use entity::{EntityNode, EntityType, ExtractedEntity};
pub use knowledge_graph::{CoOccurrence, GraphError, KnowledgeGraph};

// Expose modules as public for use by other crates
pub mod classify;
pub mod engine;
pub mod extract;
pub mod graph;
pub mod server;
pub mod snapshot;

// Re-export core types for convenience
pub use engine::{CredibilityEngine, ScoreReport, UpdateStats, Verdict};
pub use extract::EntityExtractor;
pub use graph::knowledge_graph::KnowledgeGraph;

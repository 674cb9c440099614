use serde::{Deserialize, Serialize};

/// Type tag for a named entity, assigned by the extractor when the node is
/// first created and never overwritten afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityType {
    Person,
    Organization,
    Place,
    Date,
    Other(String),
}

impl EntityType {
    /// Map a raw NER label onto the type set. Unrecognized labels are kept
    /// verbatim in the `Other` arm so no extractor output is lost.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => EntityType::Person,
            "ORG" | "ORGANIZATION" => EntityType::Organization,
            "GPE" | "LOC" | "LOCATION" | "FAC" => EntityType::Place,
            "DATE" | "TIME" => EntityType::Date,
            _ => EntityType::Other(label.to_string()),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Person => write!(f, "person"),
            EntityType::Organization => write!(f, "organization"),
            EntityType::Place => write!(f, "place"),
            EntityType::Date => write!(f, "date"),
            EntityType::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Per-entity evidence record stored in the knowledge graph.
///
/// Both counters start at zero and only ever grow; the store never decays
/// or down-weights evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityNode {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub real_count: u64,
    #[serde(default)]
    pub fake_count: u64,
}

impl EntityNode {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            real_count: 0,
            fake_count: 0,
        }
    }

    /// Total number of labeled texts this entity has been seen in.
    pub fn total_evidence(&self) -> u64 {
        self.real_count + self.fake_count
    }

    /// real / (real + fake), or `None` when the node has no evidence yet.
    pub fn credibility_ratio(&self) -> Option<f64> {
        let total = self.total_evidence();
        if total == 0 {
            None
        } else {
            Some(self.real_count as f64 / total as f64)
        }
    }
}

/// One entity occurrence as produced by an extractor, in extraction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedEntity {
    pub name: String,
    pub entity_type: EntityType,
}

impl ExtractedEntity {
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            entity_type,
        }
    }
}

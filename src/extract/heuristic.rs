use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{EntityExtractor, ExtractError};
use crate::graph::entity::{EntityType, ExtractedEntity};

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2}(?:,\s*\d{4})?\b|\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b",
    )
    .unwrap()
});

static PROPER_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][\w&.'-]*(?:[ \t][A-Z][\w&.'-]*)*").unwrap());

static LEADING_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "A", "An", "This", "That", "These", "Those", "It", "He", "She", "They", "We", "I",
        "You", "In", "On", "At", "By", "For", "But", "And", "Or", "If", "When", "While", "After",
        "Before", "As", "His", "Her", "Their", "Our", "Its", "My", "Your", "However", "Meanwhile",
        "Today", "Yesterday", "Tomorrow",
    ]
    .into_iter()
    .collect()
});

const HONORIFICS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "President", "Senator", "Governor", "Judge",
];

const ORG_SUFFIXES: &[&str] = &[
    "Corp", "Corp.", "Inc", "Inc.", "Ltd", "Ltd.", "Co", "Co.", "Company", "Corporation",
    "Group", "Agency", "Ministry", "University", "Institute", "Association", "Committee",
];

/// Offline rule-based extractor.
///
/// A regex pass over the text: explicit date formats, then runs of
/// capitalized tokens classified by honorific prefix or corporate suffix.
/// Deterministic: entities are emitted in order of appearance, so repeated
/// extraction of the same text yields the same sequence.
#[derive(Debug, Default, Clone)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan(text: &str) -> Vec<(usize, ExtractedEntity)> {
        let mut found = Vec::new();
        let mut date_spans: Vec<(usize, usize)> = Vec::new();

        for m in DATE_RE.find_iter(text) {
            date_spans.push((m.start(), m.end()));
            found.push((
                m.start(),
                ExtractedEntity::new(m.as_str(), EntityType::Date),
            ));
        }

        for m in PROPER_RUN_RE.find_iter(text) {
            let overlaps_date = date_spans
                .iter()
                .any(|&(start, end)| m.start() < end && start < m.end());
            if overlaps_date {
                continue;
            }
            if let Some(entity) = classify_run(m.as_str(), is_sentence_initial(text, m.start())) {
                found.push((m.start(), entity));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        found
    }
}

/// True when the match starts the text or follows end-of-sentence
/// punctuation, where sentence case makes a lone capitalized word
/// indistinguishable from an ordinary one.
fn is_sentence_initial(text: &str, start: usize) -> bool {
    text[..start]
        .trim_end()
        .chars()
        .last()
        .map_or(true, |c| matches!(c, '.' | '!' | '?' | '"' | '\n'))
}

/// Classify one capitalized run, stripping leading stopwords and any
/// honorific. Returns `None` when nothing entity-like remains.
fn classify_run(run: &str, sentence_initial: bool) -> Option<ExtractedEntity> {
    let mut tokens: Vec<&str> = run.split_whitespace().collect();

    while let Some(first) = tokens.first() {
        if LEADING_STOPWORDS.contains(first) {
            tokens.remove(0);
        } else {
            break;
        }
    }

    let honorific = tokens
        .first()
        .map_or(false, |first| HONORIFICS.contains(first));
    if honorific {
        tokens.remove(0);
    }

    if tokens.is_empty() {
        return None;
    }

    let name = tokens.join(" ");
    let entity_type = if honorific {
        EntityType::Person
    } else if tokens
        .last()
        .map_or(false, |last| ORG_SUFFIXES.contains(last))
    {
        EntityType::Organization
    } else if tokens.len() == 1
        && tokens[0].len() >= 2
        && tokens[0].chars().all(|c| c.is_ascii_uppercase())
    {
        // Bare acronyms read as organizations (NASA, WHO)
        EntityType::Organization
    } else if sentence_initial && tokens.len() == 1 {
        // A lone sentence-case word is most likely not a name at all
        return None;
    } else {
        EntityType::Other("unknown".to_string())
    };

    Some(ExtractedEntity::new(name, entity_type))
}

#[async_trait]
impl EntityExtractor for HeuristicExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>, ExtractError> {
        Ok(Self::scan(text).into_iter().map(|(_, e)| e).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(text: &str) -> Vec<ExtractedEntity> {
        HeuristicExtractor::new().extract(text).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_text_yields_no_entities() {
        assert!(extract("").await.is_empty());
        assert!(extract("nothing capitalized here.").await.is_empty());
    }

    #[tokio::test]
    async fn test_org_suffix_classification() {
        let entities = extract("Acme Corp announced a new product.").await;
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "Acme Corp");
        assert_eq!(entities[0].entity_type, EntityType::Organization);
    }

    #[tokio::test]
    async fn test_honorific_marks_person() {
        let entities = extract("Dr. Alice Smith spoke at the hearing.").await;
        assert_eq!(entities[0].name, "Alice Smith");
        assert_eq!(entities[0].entity_type, EntityType::Person);
    }

    #[tokio::test]
    async fn test_date_extraction() {
        let entities = extract("Filed on January 5, 2024 in court.").await;
        assert_eq!(entities[0].name, "January 5, 2024");
        assert_eq!(entities[0].entity_type, EntityType::Date);
    }

    #[tokio::test]
    async fn test_acronym_reads_as_organization() {
        let entities = extract("A statement from NASA followed.").await;
        assert_eq!(entities[0].name, "NASA");
        assert_eq!(entities[0].entity_type, EntityType::Organization);
    }

    #[tokio::test]
    async fn test_leading_stopword_is_stripped() {
        let entities = extract("The Acme Corp denies everything.").await;
        assert_eq!(entities[0].name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_appearance_order_and_determinism() {
        let text = "Mr. Bob Jones left Acme Corp on January 5, 2024.";
        let first = extract(text).await;
        let names: Vec<&str> = first.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bob Jones", "Acme Corp", "January 5, 2024"]);

        let second = extract(text).await;
        assert_eq!(first, second);
    }
}

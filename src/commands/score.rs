use anyhow::Result;
use std::path::PathBuf;

use credence::engine::CredibilityEngine;
use credence::graph::KnowledgeGraph;

use super::build_extractor;

pub async fn run(
    text: &str,
    graph_path: PathBuf,
    format: &str,
    ner_url: Option<String>,
) -> Result<()> {
    let graph = KnowledgeGraph::load_from_file(&graph_path);
    let engine = CredibilityEngine::new(graph, build_extractor(ner_url)?);

    let report = engine.score(text).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("Verdict:    {}", report.verdict);
            println!("Confidence: {:.1}%", report.confidence);
            println!("Known entities: {}", report.known_entities);
        }
    }

    Ok(())
}

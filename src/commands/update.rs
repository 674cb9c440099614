use anyhow::{Context, Result};
use std::path::PathBuf;

use credence::engine::CredibilityEngine;
use credence::graph::KnowledgeGraph;

use super::build_extractor;
use crate::cli::Label;

pub async fn run(
    text: &str,
    label: Label,
    from_file: bool,
    graph_path: PathBuf,
    ner_url: Option<String>,
) -> Result<()> {
    let text = if from_file {
        std::fs::read_to_string(text).with_context(|| format!("Failed to read {}", text))?
    } else {
        text.to_string()
    };

    let graph = KnowledgeGraph::load_from_file(&graph_path);
    let engine = CredibilityEngine::new(graph, build_extractor(ner_url)?);

    let stats = engine.update(&text, label.is_real()).await?;
    if stats.entities == 0 {
        println!("No entities extracted, graph unchanged.");
        return Ok(());
    }

    engine.snapshot(&graph_path).await?;
    println!(
        "Recorded {} entities ({} new), {} edges created, {} edges bumped.",
        stats.entities, stats.nodes_created, stats.edges_created, stats.edges_bumped
    );

    Ok(())
}

use anyhow::Result;
use std::path::PathBuf;

use credence::graph::KnowledgeGraph;

pub fn run(graph_path: PathBuf) -> Result<()> {
    let graph = KnowledgeGraph::load_from_file(&graph_path);

    println!("Knowledge graph: {}", graph_path.display());
    println!("  Entities: {}", graph.node_count());
    println!("  Co-occurrence edges: {}", graph.edge_count());

    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by(|(a_name, a), (b_name, b)| {
        b.total_evidence()
            .cmp(&a.total_evidence())
            .then_with(|| a_name.cmp(b_name))
    });

    if !nodes.is_empty() {
        println!("  Top entities by evidence:");
        for (name, node) in nodes.into_iter().take(10) {
            let ratio = node
                .credibility_ratio()
                .map_or("n/a".to_string(), |r| format!("{:.2}", r));
            println!(
                "    {:<30} {:<14} real={:<5} fake={:<5} ratio={}",
                name, node.entity_type, node.real_count, node.fake_count, ratio
            );
        }
    }

    Ok(())
}

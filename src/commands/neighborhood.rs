use anyhow::{bail, Result};
use biokg::analysis::get_neighborhood;

use super::load_graph;

/// Runs the neighborhood command
pub fn run(graph_path: &str, node: &str, hops: usize, directed: bool) -> Result<()> {
    let graph = load_graph(graph_path)?;
    if !graph.has_node(node) {
        bail!("Node not found: {}", node);
    }

    let neighborhood = get_neighborhood(&graph, node, hops, directed, true);

    println!("Nodes ({}):", neighborhood.nodes.len());
    for n in &neighborhood.nodes {
        println!("  {} [{}] {}", n.id, n.node_type, n.label);
    }

    let edges = neighborhood.edges.unwrap_or_default();
    println!("Edges ({}):", edges.len());
    for edge in edges {
        println!("  {} -[{}]-> {}", edge.source, edge.relation, edge.target);
    }

    Ok(())
}

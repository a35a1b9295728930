use anyhow::Result;
use biokg::analysis::find_hub_nodes;
use biokg::graph::{Direction, NodeType};

use super::load_graph;

/// Runs the hubs command
pub fn run(graph_path: &str, top: usize, direction: &str, node_type: Option<&str>) -> Result<()> {
    let direction: Direction = direction.parse()?;
    let node_type = node_type.map(str::parse::<NodeType>).transpose()?;

    let graph = load_graph(graph_path)?;
    let hubs = find_hub_nodes(&graph, top, direction, node_type);

    for (rank, (id, degree)) in hubs.iter().enumerate() {
        let label = graph.get_node(id.as_str()).map_or("", |n| n.label.as_str());
        println!("{:>3}. {} ({}) degree={}", rank + 1, id, label, degree);
    }
    if hubs.is_empty() {
        println!("No nodes found");
    }

    Ok(())
}

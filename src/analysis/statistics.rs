use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::centrality::compute_betweenness_centrality;
use super::neighborhood::get_all_connected_components;
use crate::graph::{DataSource, Direction, EdgeType, KnowledgeGraph, NodeId, NodeType};

/// Betweenness centrality is only computed up to this many nodes
pub const CENTRALITY_NODE_LIMIT: usize = 1000;

/// Aggregate metrics of a graph. Every numeric field is zero for an empty graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub name: String,
    pub source: DataSource,
    pub num_nodes: usize,
    pub num_edges: usize,
    /// `m / (n(n - 1))`, with a denominator of 1 for a single node
    pub density: f64,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub min_degree: usize,
    pub avg_out_degree: f64,
    pub avg_in_degree: f64,
    pub num_isolated: usize,
    pub num_components: usize,
    pub largest_component_size: usize,
    pub num_self_loops: usize,
    pub node_type_counts: BTreeMap<NodeType, usize>,
    pub edge_type_counts: BTreeMap<EdgeType, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub betweenness_centrality: Option<BTreeMap<NodeId, f64>>,
}

/// Compute [`GraphStatistics`]; betweenness centrality is added when
/// `compute_centrality` is set and the graph has at most
/// [`CENTRALITY_NODE_LIMIT`] nodes.
pub fn get_graph_statistics(graph: &KnowledgeGraph, compute_centrality: bool) -> GraphStatistics {
    let n = graph.node_count();
    let m = graph.edge_count();

    let mut stats = GraphStatistics {
        name: graph.name.clone(),
        source: graph.source,
        num_nodes: n,
        num_edges: m,
        density: 0.0,
        avg_degree: 0.0,
        max_degree: 0,
        min_degree: 0,
        avg_out_degree: 0.0,
        avg_in_degree: 0.0,
        num_isolated: 0,
        num_components: 0,
        largest_component_size: 0,
        num_self_loops: 0,
        node_type_counts: BTreeMap::new(),
        edge_type_counts: BTreeMap::new(),
        betweenness_centrality: None,
    };
    if n == 0 {
        return stats;
    }

    let max_edges = if n > 1 { n * (n - 1) } else { 1 };
    stats.density = m as f64 / max_edges as f64;

    let mut total_out = 0;
    let mut total_in = 0;
    let mut degrees = Vec::with_capacity(n);
    for node in graph.nodes() {
        let out_degree = graph.get_degree(node.id.as_str(), Direction::Outgoing);
        let in_degree = graph.get_degree(node.id.as_str(), Direction::Incoming);
        total_out += out_degree;
        total_in += in_degree;
        degrees.push(out_degree + in_degree);
    }

    stats.avg_degree = degrees.iter().sum::<usize>() as f64 / n as f64;
    stats.max_degree = degrees.iter().copied().max().unwrap_or(0);
    stats.min_degree = degrees.iter().copied().min().unwrap_or(0);
    stats.avg_out_degree = total_out as f64 / n as f64;
    stats.avg_in_degree = total_in as f64 / n as f64;
    stats.num_isolated = degrees.iter().filter(|&&d| d == 0).count();

    let components = get_all_connected_components(graph);
    stats.num_components = components.len();
    stats.largest_component_size = components.iter().map(|c| c.len()).max().unwrap_or(0);

    stats.num_self_loops = graph.edges().filter(|e| e.is_self_loop()).count();
    stats.node_type_counts = graph.get_node_type_counts();
    stats.edge_type_counts = graph.get_edge_type_counts();

    if compute_centrality && n <= CENTRALITY_NODE_LIMIT {
        stats.betweenness_centrality = Some(compute_betweenness_centrality(graph, true));
    }

    stats
}

impl fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph Statistics: {}", self.name)?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "Nodes: {}", self.num_nodes)?;
        writeln!(f, "Edges: {}", self.num_edges)?;
        writeln!(f, "Density: {:.6}", self.density)?;
        writeln!(f)?;
        writeln!(f, "Degree Statistics:")?;
        writeln!(f, "  Average: {:.2}", self.avg_degree)?;
        writeln!(f, "  Maximum: {}", self.max_degree)?;
        writeln!(f, "  Minimum: {}", self.min_degree)?;
        writeln!(f)?;
        writeln!(f, "Isolated nodes: {}", self.num_isolated)?;
        writeln!(f, "Self-loops: {}", self.num_self_loops)?;
        writeln!(f, "Connected components: {}", self.num_components)?;
        write!(f, "Largest component: {} nodes", self.largest_component_size)?;

        if !self.node_type_counts.is_empty() {
            write!(f, "\n\nNode types:")?;
            for (node_type, count) in &self.node_type_counts {
                write!(f, "\n  {}: {}", node_type, count)?;
            }
        }
        if !self.edge_type_counts.is_empty() {
            write!(f, "\n\nEdge types:")?;
            for (edge_type, count) in &self.edge_type_counts {
                write!(f, "\n  {}: {}", edge_type, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    // A -> B -> C -> D
    fn chain() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new("Chain");
        for id in ["A", "B", "C", "D"] {
            graph.add_node(Node::new(id, id, NodeType::Disease)).unwrap();
        }
        for (s, t) in [("A", "B"), ("B", "C"), ("C", "D")] {
            graph.add_edge(Edge::new(s, t, EdgeType::IsA)).unwrap();
        }
        graph
    }

    #[test]
    fn test_chain_statistics() {
        let stats = get_graph_statistics(&chain(), false);
        assert_eq!(stats.num_nodes, 4);
        assert_eq!(stats.num_edges, 3);
        assert_eq!(stats.num_components, 1);
        assert_eq!(stats.num_self_loops, 0);
        assert_eq!(stats.density, 0.25);
        assert_eq!(stats.avg_degree, 1.5);
        assert_eq!(stats.max_degree, 2);
        assert_eq!(stats.min_degree, 1);
        assert_eq!(stats.avg_out_degree, 0.75);
        assert_eq!(stats.avg_in_degree, 0.75);
        assert_eq!(stats.largest_component_size, 4);
        assert_eq!(stats.node_type_counts[&NodeType::Disease], 4);
        assert_eq!(stats.edge_type_counts[&EdgeType::IsA], 3);
        assert!(stats.betweenness_centrality.is_none());
    }

    #[test]
    fn test_self_loops_and_isolated_nodes() {
        let mut graph = chain();
        graph.add_node(Node::new("E", "E", NodeType::Gene)).unwrap();
        graph.add_edge(Edge::new("A", "A", EdgeType::RelatedTo)).unwrap();

        let stats = get_graph_statistics(&graph, false);
        assert_eq!(stats.num_self_loops, 1);
        assert_eq!(stats.num_isolated, 1);
        assert_eq!(stats.num_components, 2);
        assert_eq!(stats.min_degree, 0);
    }

    #[test]
    fn test_empty_and_single_node() {
        let stats = get_graph_statistics(&KnowledgeGraph::new("Empty"), true);
        assert_eq!(stats.num_nodes, 0);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.num_components, 0);
        assert!(stats.betweenness_centrality.is_none());

        let mut graph = KnowledgeGraph::new("One");
        graph.add_node(Node::new("A", "A", NodeType::Gene)).unwrap();
        graph.add_edge(Edge::new("A", "A", EdgeType::RelatedTo)).unwrap();
        let stats = get_graph_statistics(&graph, false);
        assert_eq!(stats.density, 1.0);
    }

    #[test]
    fn test_centrality_included_on_request() {
        let stats = get_graph_statistics(&chain(), true);
        let centrality = stats.betweenness_centrality.unwrap();
        assert_eq!(centrality.len(), 4);
        assert!(centrality["B"] > 0.0);
    }

    #[test]
    fn test_display_and_json() {
        let stats = get_graph_statistics(&chain(), false);
        let text = stats.to_string();
        assert!(text.starts_with("Graph Statistics: Chain"));
        assert!(text.contains("Density: 0.250000"));
        assert!(text.contains("  Average: 1.50"));
        assert!(text.contains("Node types:\n  disease: 4"));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["num_nodes"], 4);
        assert_eq!(json["node_type_counts"]["disease"], 4);
        assert!(json.get("betweenness_centrality").is_none());
    }
}

use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::GraphResult;
use crate::graph::{DataSource, Edge, EdgeKey, KnowledgeGraph, Node, NodeId};

/// Build a graph from node and edge lists.
///
/// Every node is inserted before any edge, so an edge may reference any node
/// in `nodes` regardless of position. Duplicate node ids and edges naming a
/// node that is not in `nodes` are errors; nothing is deduplicated here.
pub fn build_graph<N, E>(nodes: N, edges: E, name: &str) -> GraphResult<KnowledgeGraph>
where
    N: IntoIterator<Item = Node>,
    E: IntoIterator<Item = Edge>,
{
    let mut graph = KnowledgeGraph::new(name);
    graph.add_nodes(nodes)?;
    graph.add_edges(edges)?;
    debug!(
        "Built graph '{}' with {} nodes and {} edges",
        graph.name,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Merge graphs into a new one.
///
/// For node ids present in several inputs the version from the earliest
/// graph is kept; edges are deduplicated by `(source, target, relation)`,
/// again keeping the first. Inputs are left untouched. An explicit
/// `description` replaces the one derived from the inputs.
pub fn merge_graphs(
    graphs: &[&KnowledgeGraph],
    name: &str,
    description: Option<&str>,
) -> KnowledgeGraph {
    let (derived, source) = match graphs {
        [] => (None, DataSource::Custom),
        [only] => (only.description.clone(), only.source),
        [first, ..] => (
            Some(format!("Merged from {} graphs", graphs.len())),
            first.source,
        ),
    };

    let description = description.map(str::to_string).or(derived);
    let mut merged = KnowledgeGraph::with_metadata(name, description, source);
    for graph in graphs {
        merged.update(graph);
    }

    info!(
        "Merged {} graphs into '{}': {} nodes, {} edges",
        graphs.len(),
        merged.name,
        merged.node_count(),
        merged.edge_count()
    );
    merged
}

/// Collects builder output with first-occurrence-wins for repeated node ids
/// and edge triples, then hands the result to [`build_graph`].
#[derive(Debug, Default)]
pub(crate) struct RecordCollector {
    nodes: Vec<Node>,
    node_ids: HashSet<NodeId>,
    edges: Vec<Edge>,
    edge_keys: HashSet<EdgeKey>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.node_ids.contains(node_id)
    }

    /// Returns false when a node with the same id was already collected
    pub fn push_node(&mut self, node: Node) -> bool {
        if !self.node_ids.insert(node.id.clone()) {
            debug!("Skipping repeated node record: {}", node.id);
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn push_edge(&mut self, edge: Edge) -> bool {
        if !self.edge_keys.insert(edge.key()) {
            debug!(
                "Skipping repeated edge record: {} -[{}]-> {}",
                edge.source, edge.relation, edge.target
            );
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn finish(
        self,
        name: &str,
        description: &str,
        source: DataSource,
    ) -> GraphResult<KnowledgeGraph> {
        let mut graph = build_graph(self.nodes, self.edges, name)?;
        graph.description = Some(description.to_string());
        graph.source = source;
        info!(
            "Built {} graph '{}': {} nodes, {} edges",
            source,
            graph.name,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// Label derived from a prefixed id: the part after the last ':'
pub(crate) fn local_label(id: &str) -> &str {
    id.rsplit(':').next().unwrap_or(id)
}

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::graph::{Direction, Edge, KnowledgeGraph, Node, NodeId};

/// Nodes within a hop bound of a center node, and optionally the edges
/// among them
#[derive(Debug, Clone, Default)]
pub struct Neighborhood<'a> {
    /// Reached nodes in BFS order, center first
    pub nodes: Vec<&'a Node>,
    /// Edges with both endpoints among `nodes`, when requested
    pub edges: Option<Vec<&'a Edge>>,
}

impl Neighborhood<'_> {
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|n| n.id.as_str() == node_id)
    }
}

/// Collect the nodes reachable from `node_id` in at most `hops` hops.
///
/// Edges are treated as undirected unless `directed` is set, in which case
/// only out-edges are followed. An unknown `node_id` yields an empty result.
pub fn get_neighborhood<'a>(
    graph: &'a KnowledgeGraph,
    node_id: &str,
    hops: usize,
    directed: bool,
    include_edges: bool,
) -> Neighborhood<'a> {
    let Some(center) = graph.get_node(node_id) else {
        return Neighborhood {
            nodes: Vec::new(),
            edges: include_edges.then(Vec::new),
        };
    };

    let direction = if directed {
        Direction::Outgoing
    } else {
        Direction::Both
    };

    let mut visited: HashSet<&NodeId> = HashSet::from([&center.id]);
    let mut nodes = vec![center];
    let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::from([(&center.id, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= hops {
            continue;
        }
        for neighbor in graph.get_neighbors(current.as_str(), direction) {
            if visited.insert(neighbor) {
                if let Some(node) = graph.get_node(neighbor.as_str()) {
                    nodes.push(node);
                }
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    let edges = include_edges.then(|| {
        graph
            .edges()
            .filter(|e| visited.contains(&e.source) && visited.contains(&e.target))
            .collect()
    });

    Neighborhood { nodes, edges }
}

/// Every node reachable from `node_id` ignoring edge direction, including
/// `node_id` itself. Empty for an unknown id.
pub fn get_connected_component(graph: &KnowledgeGraph, node_id: &str) -> BTreeSet<NodeId> {
    let mut component = BTreeSet::new();
    let Some(start) = graph.get_node(node_id) else {
        return component;
    };

    let mut stack = vec![&start.id];
    while let Some(current) = stack.pop() {
        if !component.insert(current.clone()) {
            continue;
        }
        for neighbor in graph.get_neighbors(current.as_str(), Direction::Both) {
            if !component.contains(neighbor) {
                stack.push(neighbor);
            }
        }
    }
    component
}

/// Partition all nodes into weakly connected components, ordered by the
/// insertion position of each component's first node.
pub fn get_all_connected_components(graph: &KnowledgeGraph) -> Vec<BTreeSet<NodeId>> {
    let mut assigned: HashSet<NodeId> = HashSet::new();
    let mut components = Vec::new();

    for node in graph.nodes() {
        if assigned.contains(&node.id) {
            continue;
        }
        let component = get_connected_component(graph, node.id.as_str());
        assigned.extend(component.iter().cloned());
        components.push(component);
    }
    components
}

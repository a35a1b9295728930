use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::graph::{Direction, KnowledgeGraph, NodeId, NodeType};

/// The `top_n` highest-degree nodes, optionally restricted to one node type.
///
/// Sorted by degree descending; equal degrees are ordered by ascending id.
pub fn find_hub_nodes(
    graph: &KnowledgeGraph,
    top_n: usize,
    direction: Direction,
    node_type: Option<NodeType>,
) -> Vec<(NodeId, usize)> {
    let mut degrees: Vec<(&NodeId, usize)> = graph
        .nodes()
        .filter(|node| node_type.map_or(true, |t| node.node_type == t))
        .map(|node| (&node.id, graph.get_degree(node.id.as_str(), direction)))
        .collect();

    degrees.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    degrees
        .into_iter()
        .take(top_n)
        .map(|(id, degree)| (id.clone(), degree))
        .collect()
}

/// Number of nodes per degree value, in ascending degree order
pub fn compute_degree_distribution(
    graph: &KnowledgeGraph,
    direction: Direction,
) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for node in graph.nodes() {
        let degree = graph.get_degree(node.id.as_str(), direction);
        *distribution.entry(degree).or_insert(0) += 1;
    }
    distribution
}

/// Betweenness centrality of every node (Brandes), following edge direction.
///
/// Parallel edges count as distinct shortest paths. With `normalized` the
/// scores are scaled by `2 / ((n - 1)(n - 2))` for graphs of more than two
/// nodes.
pub fn compute_betweenness_centrality(
    graph: &KnowledgeGraph,
    normalized: bool,
) -> BTreeMap<NodeId, f64> {
    let ids: Vec<&NodeId> = graph.nodes().map(|node| &node.id).collect();
    let n = ids.len();
    let index: HashMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let successors: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| {
            graph
                .get_outgoing_edges(id.as_str())
                .into_iter()
                .filter_map(|edge| index.get(&edge.target).copied())
                .collect()
        })
        .collect();

    let mut centrality = vec![0.0f64; n];

    for source in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];
        sigma[source] = 1.0;
        distance[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let next_distance = distance[v].map_or(0, |d| d + 1);
            for &w in &successors[v] {
                if distance[w].is_none() {
                    distance[w] = Some(next_distance);
                    queue.push_back(w);
                }
                if distance[w] == Some(next_distance) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    if normalized && n > 2 {
        let scale = 2.0 / ((n - 1) * (n - 2)) as f64;
        for score in &mut centrality {
            *score *= scale;
        }
    }

    ids.into_iter()
        .cloned()
        .zip(centrality)
        .collect()
}

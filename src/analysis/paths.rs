use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::{Direction, Edge, KnowledgeGraph, NodeId};

fn traversal_direction(directed: bool) -> Direction {
    if directed {
        Direction::Outgoing
    } else {
        Direction::Both
    }
}

/// Find the shortest path between two nodes by hop count.
///
/// With `directed` only out-edges are followed; otherwise edges are walked in
/// either direction. Paths longer than `max_depth` edges are not considered.
/// Among equally short paths the first one discovered wins, visiting each
/// node's out-edges before its in-edges in insertion order.
///
/// Returns `None` when either node is unknown or no path exists in bound.
pub fn find_shortest_path(
    graph: &KnowledgeGraph,
    source: &str,
    target: &str,
    directed: bool,
    max_depth: Option<usize>,
) -> Option<Vec<NodeId>> {
    let source = &graph.get_node(source)?.id;
    let target = &graph.get_node(target)?.id;
    if source == target {
        return Some(vec![source.clone()]);
    }

    let direction = traversal_direction(directed);
    let mut parents: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut visited: HashSet<&NodeId> = HashSet::from([source]);
    let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::from([(source, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        if max_depth.map_or(false, |max| depth >= max) {
            continue;
        }

        for neighbor in graph.get_neighbors(current.as_str(), direction) {
            if !visited.insert(neighbor) {
                continue;
            }
            parents.insert(neighbor, current);

            if neighbor == target {
                let mut path = vec![neighbor.clone()];
                let mut step = neighbor;
                while let Some(&parent) = parents.get(step) {
                    path.push(parent.clone());
                    step = parent;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back((neighbor, depth + 1));
        }
    }

    None
}

/// Enumerate every simple path from `source` to `target` with at most
/// `max_depth` edges, in depth-first discovery order.
///
/// The number of paths grows combinatorially with `max_depth` on dense
/// graphs; keep it small.
pub fn find_all_paths(
    graph: &KnowledgeGraph,
    source: &str,
    target: &str,
    max_depth: usize,
    directed: bool,
) -> Vec<Vec<NodeId>> {
    let mut paths = Vec::new();
    let (Some(source), Some(target)) = (graph.get_node(source), graph.get_node(target)) else {
        return paths;
    };

    let mut visited = HashSet::from([&source.id]);
    let mut current_path = vec![&source.id];
    find_paths_recursive(
        graph,
        &target.id,
        max_depth,
        traversal_direction(directed),
        &mut visited,
        &mut current_path,
        &mut paths,
    );
    paths
}

fn find_paths_recursive<'a>(
    graph: &'a KnowledgeGraph,
    target: &NodeId,
    max_depth: usize,
    direction: Direction,
    visited: &mut HashSet<&'a NodeId>,
    current_path: &mut Vec<&'a NodeId>,
    paths: &mut Vec<Vec<NodeId>>,
) {
    let Some(&current) = current_path.last() else {
        return;
    };

    if current == target {
        paths.push(current_path.iter().map(|&id| id.clone()).collect());
        return;
    }

    // Edges so far is one less than the node count
    if current_path.len() > max_depth {
        return;
    }

    for next in graph.get_neighbors(current.as_str(), direction) {
        if visited.insert(next) {
            current_path.push(next);
            find_paths_recursive(graph, target, max_depth, direction, visited, current_path, paths);
            current_path.pop();
            visited.remove(next);
        }
    }
}

/// The first edge joining each consecutive pair of `path`, following the
/// path's direction; `None` where the pair is not joined that way.
pub fn get_path_edges<'a, S: AsRef<str>>(
    graph: &'a KnowledgeGraph,
    path: &[S],
) -> Vec<Option<&'a Edge>> {
    path.windows(2)
        .map(|pair| graph.get_edge(pair[0].as_ref(), pair[1].as_ref(), None))
        .collect()
}

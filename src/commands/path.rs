use anyhow::{bail, Result};
use biokg::analysis::{find_all_paths, find_shortest_path, get_path_edges};
use biokg::graph::{KnowledgeGraph, NodeId};

use super::load_graph;

/// Default bound for `--all`, where enumeration is exponential
const DEFAULT_ALL_PATHS_DEPTH: usize = 5;

/// Runs the path command
pub fn run(
    graph_path: &str,
    from: &str,
    to: &str,
    directed: bool,
    max_depth: Option<usize>,
    all: bool,
) -> Result<()> {
    let graph = load_graph(graph_path)?;
    for id in [from, to] {
        if !graph.has_node(id) {
            bail!("Node not found: {}", id);
        }
    }

    if all {
        let depth = max_depth.unwrap_or(DEFAULT_ALL_PATHS_DEPTH);
        let paths = find_all_paths(&graph, from, to, depth, directed);
        if paths.is_empty() {
            println!("No paths from {} to {} within {} hops", from, to, depth);
        }
        for path in &paths {
            println!("{}", render_path(&graph, path));
        }
        eprintln!("{} path(s)", paths.len());
        return Ok(());
    }

    match find_shortest_path(&graph, from, to, directed, max_depth) {
        Some(path) => println!("{}", render_path(&graph, &path)),
        None => println!("No path from {} to {}", from, to),
    }
    Ok(())
}

/// `A -[is_a]-> B`, with `<-[..]-` for hops walked against edge direction
fn render_path(graph: &KnowledgeGraph, path: &[NodeId]) -> String {
    let mut rendered = match path.first() {
        Some(first) => first.to_string(),
        None => return String::new(),
    };
    for (pair, edge) in path.windows(2).zip(get_path_edges(graph, path)) {
        let (prev, next) = (&pair[0], &pair[1]);
        let hop = match edge {
            Some(edge) => format!(" -[{}]-> {}", edge.relation, next),
            None => match graph.get_edge(next.as_str(), prev.as_str(), None) {
                Some(edge) => format!(" <-[{}]- {}", edge.relation, next),
                None => format!(" -- {}", next),
            },
        };
        rendered.push_str(&hop);
    }
    rendered
}

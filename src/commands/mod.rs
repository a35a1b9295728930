pub mod export;
pub mod hubs;
pub mod merge;
pub mod neighborhood;
pub mod path;
pub mod stats;

use anyhow::{Context, Result};
use biokg::KnowledgeGraph;
use std::fs;
use std::path::Path;

/// Read a graph stored in round-trip JSON format
pub fn load_graph(path: impl AsRef<Path>) -> Result<KnowledgeGraph> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let graph = KnowledgeGraph::from_json(&json)
        .with_context(|| format!("Invalid graph file {}", path.display()))?;
    tracing::debug!("Loaded {}", graph);
    Ok(graph)
}

/// Write `content` to `output`, or to stdout when no path is given
pub fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("Wrote {}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

use anyhow::{Context, Result};
use biokg::builders::merge_graphs;
use std::fs;

use super::load_graph;

/// Runs the merge command
pub fn run(
    output: &str,
    inputs: &[String],
    name: &str,
    description: Option<&str>,
) -> Result<()> {
    let graphs = inputs
        .iter()
        .map(load_graph)
        .collect::<Result<Vec<_>>>()?;
    let refs: Vec<_> = graphs.iter().collect();

    let merged = merge_graphs(&refs, name, description);
    fs::write(output, merged.to_json()?)
        .with_context(|| format!("Failed to write merged graph to {}", output))?;

    println!("{}", merged);
    Ok(())
}

use anyhow::Result;
use biokg::analysis::get_graph_statistics;

use super::load_graph;
use crate::cli::OutputFormat;

/// Runs the stats command
pub fn run(graph_path: &str, format: OutputFormat, centrality: bool) -> Result<()> {
    let graph = load_graph(graph_path)?;
    let stats = get_graph_statistics(&graph, centrality);

    match format {
        OutputFormat::Text => println!("{}", stats),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }

    Ok(())
}

use anyhow::{Context, Result};
use biokg::export::{
    edges_table, nodes_table, to_cypher, to_digraph, to_json_ld, to_neo4j_csv, to_rdf,
    CypherOptions, DiGraphOptions, JsonLdOptions, Neo4jCsvOptions, RdfFormat, RdfOptions,
};

use super::{load_graph, write_output};
use crate::cli::ExportFormat;

/// Runs the export command
pub fn run(
    graph_path: &str,
    format: ExportFormat,
    output: Option<&str>,
    base_uri: Option<&str>,
) -> Result<()> {
    let graph = load_graph(graph_path)?;
    tracing::info!("Exporting {} as {}", graph, format);

    let content = match format {
        ExportFormat::Networkx => {
            let exported = to_digraph(&graph, &DiGraphOptions::default());
            serde_json::to_string_pretty(&exported.to_node_link())?
        }
        ExportFormat::JsonLd => {
            let options = JsonLdOptions {
                base_uri: base_uri.map(str::to_string),
                ..JsonLdOptions::default()
            };
            serde_json::to_string_pretty(&to_json_ld(&graph, &options))?
        }
        ExportFormat::Turtle | ExportFormat::Xml | ExportFormat::N3 | ExportFormat::Nt => {
            let mut options = RdfOptions {
                format: format.to_string().parse::<RdfFormat>()?,
                ..RdfOptions::default()
            };
            if let Some(base_uri) = base_uri {
                options.base_uri = base_uri.to_string();
            }
            to_rdf(&graph, &options)
        }
        ExportFormat::Cypher => to_cypher(&graph, &CypherOptions::default()),
        ExportFormat::Neo4jCsv => {
            let dir = output.unwrap_or(".");
            let (nodes, edges) = to_neo4j_csv(&graph, dir, &Neo4jCsvOptions::default())
                .with_context(|| format!("Failed to write Neo4j CSV files into {}", dir))?;
            println!("{}\n{}", nodes.display(), edges.display());
            return Ok(());
        }
        ExportFormat::Csv => {
            format!(
                "{}\n{}",
                nodes_table(&graph).to_csv(),
                edges_table(&graph).to_csv()
            )
        }
    };

    write_output(output, &content)
}

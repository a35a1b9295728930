use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::format_float;
use super::table::csv_row;
use crate::error::GraphResult;
use crate::graph::{KnowledgeGraph, Properties};

pub const NODE_HEADER: [&str; 7] = [
    "id:ID",
    "label",
    "node_type",
    "source",
    "properties:string",
    "xrefs:string[]",
    ":LABEL",
];

pub const RELATIONSHIP_HEADER: [&str; 6] = [
    ":START_ID",
    ":END_ID",
    "weight:float",
    "evidence:string[]",
    "properties:string",
    ":TYPE",
];

#[derive(Debug, Clone)]
pub struct Neo4jCsvOptions {
    pub nodes_filename: String,
    pub edges_filename: String,
    pub include_headers: bool,
}

impl Default for Neo4jCsvOptions {
    fn default() -> Self {
        Self {
            nodes_filename: "nodes.csv".to_string(),
            edges_filename: "relationships.csv".to_string(),
            include_headers: true,
        }
    }
}

/// Node and relationship files in `neo4j-admin import` layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jCsv {
    pub nodes: String,
    pub relationships: String,
}

fn properties_cell(properties: &Properties) -> GraphResult<String> {
    if properties.is_empty() {
        return Ok(String::new());
    }
    Ok(serde_json::to_string(&properties.to_map())?)
}

fn join_values<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";")
}

/// Render both CSV tables in memory
pub fn render_neo4j_csv(graph: &KnowledgeGraph, include_headers: bool) -> GraphResult<Neo4jCsv> {
    let mut nodes = String::new();
    if include_headers {
        nodes.push_str(&csv_row(&NODE_HEADER));
    }
    for node in graph.nodes() {
        nodes.push_str(&csv_row(&[
            node.id.to_string(),
            node.label.clone(),
            node.node_type.to_string(),
            node.source.to_string(),
            properties_cell(&node.properties)?,
            join_values(&node.xrefs),
            node.node_type.graph_label(),
        ]));
    }

    let mut relationships = String::new();
    if include_headers {
        relationships.push_str(&csv_row(&RELATIONSHIP_HEADER));
    }
    for edge in graph.edges() {
        relationships.push_str(&csv_row(&[
            edge.source.to_string(),
            edge.target.to_string(),
            format_float(edge.weight),
            join_values(&edge.evidence),
            properties_cell(&edge.properties)?,
            edge.relation.graph_type(),
        ]));
    }

    Ok(Neo4jCsv {
        nodes,
        relationships,
    })
}

/// Write the node and relationship CSV files into `output_dir`, creating it
/// if needed. Returns the two file paths.
pub fn to_neo4j_csv(
    graph: &KnowledgeGraph,
    output_dir: impl AsRef<Path>,
    options: &Neo4jCsvOptions,
) -> GraphResult<(PathBuf, PathBuf)> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let csv = render_neo4j_csv(graph, options.include_headers)?;
    let nodes_path = output_dir.join(&options.nodes_filename);
    let edges_path = output_dir.join(&options.edges_filename);
    fs::write(&nodes_path, csv.nodes)?;
    fs::write(&edges_path, csv.relationships)?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dir = %output_dir.display(),
        "Exported Neo4j CSV"
    );
    Ok((nodes_path, edges_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DataSource, Edge, EdgeType, Node, NodeType};
    use tempfile::tempdir;

    fn create_test_kg() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new("Neo4j");
        kg.add_node(
            Node::new("GO:0006915", "apoptotic process", NodeType::GoTerm)
                .with_source(DataSource::GeneOntology)
                .with_property("aspect", "biological_process"),
        )
        .unwrap();
        kg.add_node(
            Node::new("UniProtKB:P04637", "P04637", NodeType::Protein)
                .with_xrefs(["HGNC:11998", "Ensembl:ENSG00000141510"]),
        )
        .unwrap();
        kg.add_edge(
            Edge::new("UniProtKB:P04637", "GO:0006915", EdgeType::ParticipatesIn)
                .with_evidence(["IDA", "IMP"])
                .with_weight(0.75),
        )
        .unwrap();
        kg
    }

    #[test]
    fn test_render_neo4j_csv() {
        let csv = render_neo4j_csv(&create_test_kg(), true).unwrap();
        let nodes: Vec<&str> = csv.nodes.lines().collect();
        assert_eq!(
            nodes[0],
            "id:ID,label,node_type,source,properties:string,xrefs:string[],:LABEL"
        );
        assert_eq!(
            nodes[1],
            "GO:0006915,apoptotic process,go_term,gene_ontology,\"{\"\"aspect\"\":\"\"biological_process\"\"}\",,GoTerm"
        );
        assert_eq!(
            nodes[2],
            "UniProtKB:P04637,P04637,protein,custom,,Ensembl:ENSG00000141510;HGNC:11998,Protein"
        );

        let rels: Vec<&str> = csv.relationships.lines().collect();
        assert_eq!(
            rels[0],
            ":START_ID,:END_ID,weight:float,evidence:string[],properties:string,:TYPE"
        );
        assert_eq!(
            rels[1],
            "UniProtKB:P04637,GO:0006915,0.75,IDA;IMP,,PARTICIPATES_IN"
        );
    }

    #[test]
    fn test_render_without_headers() {
        let csv = render_neo4j_csv(&create_test_kg(), false).unwrap();
        assert_eq!(csv.nodes.lines().count(), 2);
        assert!(csv.nodes.starts_with("GO:0006915"));
        assert_eq!(csv.relationships.lines().count(), 1);
    }

    #[test]
    fn test_to_neo4j_csv_writes_files() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("neo4j_import");
        let options = Neo4jCsvOptions {
            nodes_filename: "n.csv".to_string(),
            ..Neo4jCsvOptions::default()
        };

        let (nodes_path, edges_path) = to_neo4j_csv(&create_test_kg(), &output, &options).unwrap();
        assert_eq!(nodes_path, output.join("n.csv"));
        assert_eq!(edges_path, output.join("relationships.csv"));

        let nodes = fs::read_to_string(&nodes_path).unwrap();
        assert_eq!(nodes.lines().count(), 3);
        let edges = fs::read_to_string(&edges_path).unwrap();
        assert!(edges.ends_with("PARTICIPATES_IN\n"));
    }
}

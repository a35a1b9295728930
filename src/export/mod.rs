//! Projections of a [`KnowledgeGraph`](crate::graph::KnowledgeGraph) into
//! external formats. Exporters never mutate the graph they read.

pub mod cypher;
pub mod digraph;
pub mod json_ld;
pub mod neo4j;
pub mod rdf;
pub mod table;

pub use cypher::{to_cypher, CypherOptions};
pub use digraph::{to_digraph, DiGraphOptions, EdgeWeight, ExportedDiGraph, NodeWeight};
pub use json_ld::{to_json_ld, JsonLdOptions, BIOKG_CONTEXT};
pub use neo4j::{render_neo4j_csv, to_neo4j_csv, Neo4jCsv, Neo4jCsvOptions};
pub use rdf::{to_rdf, RdfFormat, RdfOptions};
pub use table::{edges_table, nodes_table, Table};

/// Shortest round-trip text for a float that always keeps a decimal point
/// (`1.0`, not `1`)
pub(crate) fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

use std::collections::BTreeSet;
use tracing::info;

use super::format_float;
use crate::graph::{KnowledgeGraph, NodeType};

const RESERVED_NODE_KEYS: [&str; 3] = ["id", "label", "source"];

#[derive(Debug, Clone, Copy)]
pub struct CypherOptions {
    /// Statements between blank separator lines; 0 disables grouping
    pub batch_size: usize,
    /// `MERGE` with uniqueness constraints instead of plain `CREATE`
    pub use_merge: bool,
}

impl Default for CypherOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            use_merge: true,
        }
    }
}

/// Quote a string as a single-quoted Cypher literal
fn cypher_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("'{}'", escaped)
}

fn cypher_list<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    let items: Vec<String> = values.into_iter().map(|v| cypher_string(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Property keys that are not plain identifiers are backtick-quoted
fn cypher_key(key: &str) -> String {
    let mut chars = key.chars();
    let simple = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        key.to_string()
    } else {
        format!("`{}`", key.replace('`', "``"))
    }
}

fn map_literal(entries: &[(String, String)]) -> String {
    let body = entries
        .iter()
        .map(|(k, v)| format!("{}: {}", cypher_key(k), v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}

fn starts_batch(i: usize, batch_size: usize) -> bool {
    batch_size > 0 && i > 0 && i % batch_size == 0
}

/// Render the graph as a Cypher script.
///
/// Layout: a header comment, uniqueness constraints on `id` per node label
/// (MERGE mode only), one statement per node, then one `MATCH ... MERGE`
/// (or `CREATE`) statement per edge. A blank line separates every
/// `batch_size` statements.
pub fn to_cypher(graph: &KnowledgeGraph, options: &CypherOptions) -> String {
    let command = if options.use_merge { "MERGE" } else { "CREATE" };
    let mut lines: Vec<String> = vec![
        format!("// Cypher script generated from KnowledgeGraph: {}", graph.name),
        format!(
            "// Nodes: {}, Edges: {}",
            graph.node_count(),
            graph.edge_count()
        ),
        String::new(),
    ];

    if options.use_merge {
        let node_types: BTreeSet<NodeType> = graph.nodes().map(|n| n.node_type).collect();
        for node_type in node_types {
            lines.push(format!(
                "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{}) REQUIRE n.id IS UNIQUE;",
                node_type.graph_label()
            ));
        }
        lines.push(String::new());
    }

    lines.push("// Create nodes".to_string());
    for (i, node) in graph.nodes().enumerate() {
        if starts_batch(i, options.batch_size) {
            lines.push(String::new());
        }

        let mut entries = vec![
            ("id".to_string(), cypher_string(node.id.as_str())),
            ("label".to_string(), cypher_string(&node.label)),
            ("source".to_string(), cypher_string(node.source.as_str())),
        ];
        for (key, value) in node.properties.to_map() {
            if !RESERVED_NODE_KEYS.contains(&key.as_str()) {
                entries.push((key, cypher_string(&value)));
            }
        }

        lines.push(format!(
            "{} (:{} {});",
            command,
            node.node_type.graph_label(),
            map_literal(&entries)
        ));
    }

    lines.push(String::new());
    lines.push("// Create relationships".to_string());
    for (i, edge) in graph.edges().enumerate() {
        if starts_batch(i, options.batch_size) {
            lines.push(String::new());
        }

        let mut entries = vec![("weight".to_string(), format_float(edge.weight))];
        if !edge.evidence.is_empty() {
            entries.push(("evidence".to_string(), cypher_list(&edge.evidence)));
        }
        for (key, value) in edge.properties.to_map() {
            if key != "weight" && key != "evidence" {
                entries.push((key, cypher_string(&value)));
            }
        }

        lines.push(format!(
            "MATCH (a {{id: {}}}), (b {{id: {}}}) {} (a)-[:{} {}]->(b);",
            cypher_string(edge.source.as_str()),
            cypher_string(edge.target.as_str()),
            command,
            edge.relation.graph_type(),
            map_literal(&entries)
        ));
    }

    info!(
        graph = %graph.name,
        statements = graph.node_count() + graph.edge_count(),
        "Exported Cypher script"
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DataSource, Edge, EdgeType, Node};
    use indoc::indoc;

    fn create_test_kg() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new("Cypher");
        kg.add_node(
            Node::new("DOID:1612", "Paget's disease", NodeType::Disease)
                .with_source(DataSource::DiseaseOntology)
                .with_property("definition", "a \\ b"),
        )
        .unwrap();
        kg.add_node(Node::new("HGNC:11998", "TP53", NodeType::Gene)).unwrap();
        kg.add_edge(
            Edge::new("HGNC:11998", "DOID:1612", EdgeType::AssociatedWith)
                .with_evidence(["TAS"])
                .with_property("pmid", "123"),
        )
        .unwrap();
        kg
    }

    #[test]
    fn test_to_cypher_merge() {
        let script = to_cypher(&create_test_kg(), &CypherOptions::default());
        let expected = indoc! {r#"
            // Cypher script generated from KnowledgeGraph: Cypher
            // Nodes: 2, Edges: 1

            CREATE CONSTRAINT IF NOT EXISTS FOR (n:Gene) REQUIRE n.id IS UNIQUE;
            CREATE CONSTRAINT IF NOT EXISTS FOR (n:Disease) REQUIRE n.id IS UNIQUE;

            // Create nodes
            MERGE (:Disease {id: 'DOID:1612', label: 'Paget\'s disease', source: 'disease_ontology', definition: 'a \\ b'});
            MERGE (:Gene {id: 'HGNC:11998', label: 'TP53', source: 'custom'});

            // Create relationships
            MATCH (a {id: 'HGNC:11998'}), (b {id: 'DOID:1612'}) MERGE (a)-[:ASSOCIATED_WITH {weight: 1.0, evidence: ['TAS'], pmid: '123'}]->(b);"#};
        assert_eq!(script, expected);
    }

    #[test]
    fn test_to_cypher_create_without_constraints() {
        let options = CypherOptions {
            use_merge: false,
            ..CypherOptions::default()
        };
        let script = to_cypher(&create_test_kg(), &options);
        assert!(!script.contains("CONSTRAINT"));
        assert!(!script.contains("MERGE"));
        assert!(script.contains("CREATE (:Gene {id: 'HGNC:11998'"));
        assert!(script.contains(") CREATE (a)-[:ASSOCIATED_WITH"));
    }

    #[test]
    fn test_batching_inserts_separators() {
        let mut kg = KnowledgeGraph::new("Batch");
        for i in 0..5 {
            kg.add_node(Node::new(format!("N{i}"), format!("n{i}"), NodeType::Other))
                .unwrap();
        }
        let options = CypherOptions {
            batch_size: 2,
            use_merge: false,
        };
        let script = to_cypher(&kg, &options);
        let nodes_section: Vec<&str> = script
            .lines()
            .skip_while(|l| *l != "// Create nodes")
            .take_while(|l| *l != "// Create relationships")
            .collect();
        // header, 5 statements, 2 separators, trailing blank
        assert_eq!(nodes_section.len(), 9);
        assert_eq!(nodes_section[3], "");
        assert_eq!(nodes_section[6], "");
    }

    #[test]
    fn test_cypher_key_quoting() {
        assert_eq!(cypher_key("p_value"), "p_value");
        assert_eq!(cypher_key("is root"), "`is root`");
        assert_eq!(cypher_key("2x"), "`2x`");
    }
}

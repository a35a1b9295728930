use crate::graph::{Edge, KnowledgeGraph, Node, Properties};

use super::format_float;

/// Row/column projection of a node or edge collection; every cell is text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV with a header row
    pub fn to_csv(&self) -> String {
        let mut result = String::new();
        result.push_str(&csv_row(&self.columns));
        for row in &self.rows {
            result.push_str(&csv_row(row));
        }
        result
    }
}

/// One CSV line, terminated by a newline
pub(crate) fn csv_row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut line = cells
        .iter()
        .map(|cell| escape_csv_value(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Quote a CSV value if it contains a separator, quote or line break
pub(crate) fn escape_csv_value(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        let escaped = value.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}

fn display_properties(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_set<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";")
}

fn node_row(node: &Node) -> Vec<String> {
    vec![
        node.id.to_string(),
        node.label.clone(),
        node.node_type.to_string(),
        node.source.to_string(),
        display_properties(&node.properties),
        join_set(&node.xrefs),
    ]
}

fn edge_row(edge: &Edge) -> Vec<String> {
    vec![
        edge.source.to_string(),
        edge.target.to_string(),
        edge.relation.to_string(),
        format_float(edge.weight),
        join_set(&edge.evidence),
        display_properties(&edge.properties),
    ]
}

/// One row per node: id, label, node_type, source, properties, xrefs
pub fn nodes_table(graph: &KnowledgeGraph) -> Table {
    let mut table = Table::new(["id", "label", "node_type", "source", "properties", "xrefs"]);
    for node in graph.nodes() {
        table.push_row(node_row(node));
    }
    table
}

/// One row per edge: source, target, relation, weight, evidence, properties
pub fn edges_table(graph: &KnowledgeGraph) -> Table {
    let mut table = Table::new(["source", "target", "relation", "weight", "evidence", "properties"]);
    for edge in graph.edges() {
        table.push_row(edge_row(edge));
    }
    table
}

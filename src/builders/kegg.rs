use std::collections::BTreeMap;
use tracing::warn;

use super::generic::{local_label, RecordCollector};
use super::records::{KeggDataset, KeggFormat, KeggLink};
use crate::error::GraphResult;
use crate::graph::{DataSource, Edge, EdgeType, KnowledgeGraph, Node, NodeType};

/// Flat-file sections copied onto nodes as lowercase properties
const FLAT_FILE_SECTIONS: [&str; 5] = ["DEFINITION", "PATHWAY", "MODULE", "DISEASE", "DBLINKS"];

#[derive(Debug, Clone)]
pub struct KeggGraphOptions {
    pub name: String,
    /// Overrides the node type inferred from the entry ids
    pub node_type: Option<NodeType>,
}

impl Default for KeggGraphOptions {
    fn default() -> Self {
        Self {
            name: "KEGGGraph".to_string(),
            node_type: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeggLinkOptions {
    pub name: String,
    pub source_type: NodeType,
    pub target_type: NodeType,
    pub relation: EdgeType,
}

impl Default for KeggLinkOptions {
    fn default() -> Self {
        Self {
            name: "KEGGLinkGraph".to_string(),
            source_type: NodeType::Gene,
            target_type: NodeType::Pathway,
            relation: EdgeType::ParticipatesIn,
        }
    }
}

/// Guess the node type of a KEGG entry from its identifier
pub fn infer_kegg_node_type(entry_id: &str) -> NodeType {
    if entry_id.starts_with("path:") || entry_id.starts_with("map") {
        return NodeType::Pathway;
    }
    match entry_id.chars().next() {
        Some('C') => NodeType::Compound,
        Some('D') => NodeType::Drug,
        Some('R') => NodeType::Reaction,
        // KO entries
        Some('K') => NodeType::Gene,
        Some('M') => NodeType::Pathway,
        // Organism-prefixed genes such as hsa:7157
        _ if entry_id.contains(':') => NodeType::Gene,
        _ => NodeType::Other,
    }
}

fn record_field<'a>(
    record: &'a BTreeMap<String, String>,
    keys: [&str; 2],
) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

/// Build a graph with one node per KEGG entry.
///
/// For `list` results the node type is inferred from the first entry id;
/// other operations yield OTHER nodes unless `options.node_type` is set.
/// Records without an entry id are dropped.
pub fn build_kegg_graph(
    dataset: &KeggDataset,
    options: &KeggGraphOptions,
) -> GraphResult<KnowledgeGraph> {
    let node_type = options.node_type.unwrap_or_else(|| {
        if dataset.operation == "list" {
            dataset
                .records
                .first()
                .and_then(|record| record_field(record, ["entry_id", "ENTRY"]))
                .map(infer_kegg_node_type)
                .unwrap_or(NodeType::Other)
        } else {
            NodeType::Other
        }
    });

    let mut collector = RecordCollector::new();
    for record in &dataset.records {
        let Some(entry_id) = record_field(record, ["entry_id", "ENTRY"]) else {
            warn!("Dropping KEGG record without an entry id");
            continue;
        };
        let label = record_field(record, ["description", "NAME"]).unwrap_or(entry_id);

        let mut node = Node::new(entry_id, label, node_type).with_source(DataSource::Kegg);
        if dataset.format == KeggFormat::FlatFile {
            for section in FLAT_FILE_SECTIONS {
                if let Some(value) = record.get(section) {
                    node = node.with_property(section.to_lowercase(), value.as_str());
                }
            }
        }
        collector.push_node(node);
    }

    collector.finish(
        &options.name,
        "Knowledge graph from KEGG database",
        DataSource::Kegg,
    )
}

/// Build a graph from KEGG `link` rows: typed source and target nodes and one
/// edge per distinct link. An id seen as both source and target keeps the
/// source type.
pub fn build_kegg_link_graph(
    links: &[KeggLink],
    options: &KeggLinkOptions,
) -> GraphResult<KnowledgeGraph> {
    let links: Vec<&KeggLink> = links
        .iter()
        .filter(|link| !link.source_id.is_empty() && !link.target_id.is_empty())
        .collect();

    let mut collector = RecordCollector::new();
    for link in &links {
        let id = link.source_id.as_str();
        collector.push_node(
            Node::new(id, local_label(id), options.source_type).with_source(DataSource::Kegg),
        );
    }
    for link in &links {
        let id = link.target_id.as_str();
        collector.push_node(
            Node::new(id, local_label(id), options.target_type).with_source(DataSource::Kegg),
        );
    }
    for link in &links {
        collector.push_edge(Edge::new(
            link.source_id.as_str(),
            link.target_id.as_str(),
            options.relation,
        ));
    }

    collector.finish(
        &options.name,
        "Knowledge graph from KEGG links",
        DataSource::Kegg,
    )
}

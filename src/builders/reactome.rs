use super::generic::RecordCollector;
use super::records::{ReactomeEvent, ReactomePathway};
use crate::error::GraphResult;
use crate::graph::{DataSource, Edge, EdgeType, KnowledgeGraph, Node, NodeType};

#[derive(Debug, Clone)]
pub struct ReactomeGraphOptions {
    pub name: String,
    pub include_species: bool,
    pub include_disease_info: bool,
}

impl Default for ReactomeGraphOptions {
    fn default() -> Self {
        Self {
            name: "ReactomeGraph".to_string(),
            include_species: true,
            include_disease_info: true,
        }
    }
}

fn pathway_node(pathway: &ReactomePathway, options: &ReactomeGraphOptions) -> Node {
    let mut node = Node::new(pathway.st_id.as_str(), pathway.name.as_str(), NodeType::Pathway)
        .with_source(DataSource::Reactome);

    let statistics = [
        ("p_value", pathway.p_value.map(|v| v.to_string())),
        ("fdr", pathway.fdr.map(|v| v.to_string())),
        ("found_entities", pathway.found_entities.map(|v| v.to_string())),
        ("total_entities", pathway.total_entities.map(|v| v.to_string())),
    ];
    for (key, value) in statistics {
        if let Some(value) = value {
            node = node.with_property(key, value);
        }
    }

    if options.include_species {
        if let Some(species) = &pathway.species {
            node = node
                .with_property("species", species.name.as_str())
                .with_property("taxon_id", species.tax_id.as_str());
        }
    }
    if options.include_disease_info {
        node = node
            .with_property("is_disease_pathway", pathway.in_disease.to_string())
            .with_property("is_lowest_level", pathway.llp.to_string());
    }
    if let Some(db_id) = pathway.db_id {
        node = node.with_property("db_id", db_id.to_string());
    }
    node
}

/// Build a graph with one PATHWAY node per Reactome pathway.
pub fn build_reactome_graph(
    pathways: &[ReactomePathway],
    options: &ReactomeGraphOptions,
) -> GraphResult<KnowledgeGraph> {
    let mut collector = RecordCollector::new();
    for pathway in pathways {
        collector.push_node(pathway_node(pathway, options));
    }
    collector.finish(
        &options.name,
        "Knowledge graph from Reactome pathways",
        DataSource::Reactome,
    )
}

/// Build a pathway graph from Reactome's nested event hierarchy, linking
/// every event to its parent with a PART_OF edge. Events without a stable
/// id are skipped together with their subtree.
pub fn build_reactome_hierarchy_graph(
    events: &[ReactomeEvent],
    name: &str,
) -> GraphResult<KnowledgeGraph> {
    let mut collector = RecordCollector::new();
    // Depth-first, parents before children
    let mut stack: Vec<(&ReactomeEvent, Option<&str>)> =
        events.iter().rev().map(|event| (event, None)).collect();

    while let Some((event, parent)) = stack.pop() {
        if event.st_id.is_empty() {
            continue;
        }

        let label = event
            .name
            .as_deref()
            .or(event.display_name.as_deref())
            .unwrap_or_default();
        let mut node = Node::new(event.st_id.as_str(), label, NodeType::Pathway)
            .with_source(DataSource::Reactome);
        if event.has_diagram {
            node = node.with_property("has_diagram", "true");
        }
        if let Some(species) = event.species.as_deref() {
            node = node.with_property("species", species);
        }
        collector.push_node(node);

        if let Some(parent) = parent {
            collector.push_edge(Edge::new(event.st_id.as_str(), parent, EdgeType::PartOf));
        }

        for child in event.children.iter().rev() {
            stack.push((child, Some(event.st_id.as_str())));
        }
    }

    collector.finish(
        name,
        "Knowledge graph from Reactome pathway hierarchy",
        DataSource::Reactome,
    )
}

use super::generic::{local_label, RecordCollector};
use super::records::GoAnnotation;
use crate::error::GraphResult;
use crate::graph::{DataSource, Edge, EdgeType, KnowledgeGraph, Node, NodeType};

#[derive(Debug, Clone)]
pub struct GoGraphOptions {
    pub name: String,
    pub include_evidence: bool,
    pub create_annotation_edges: bool,
}

impl Default for GoGraphOptions {
    fn default() -> Self {
        Self {
            name: "GeneOntologyGraph".to_string(),
            include_evidence: true,
            create_annotation_edges: true,
        }
    }
}

/// Annotation relation implied by a GO qualifier such as "involved_in",
/// "part_of" or "NOT|enables"
pub fn relation_from_qualifier(qualifier: Option<&str>) -> EdgeType {
    match qualifier {
        Some(q) if q.to_uppercase().contains("NOT") => EdgeType::NegativelyRegulates,
        Some(q) if q.to_lowercase().contains("part_of") => EdgeType::PartOf,
        Some(q) if q.to_lowercase().contains("regulates") => EdgeType::Regulates,
        _ => EdgeType::AssociatedWith,
    }
}

fn gene_product_type(id: &str) -> NodeType {
    if id.starts_with("UniProtKB:") || id.starts_with("UniProt:") {
        NodeType::Protein
    } else {
        NodeType::Gene
    }
}

/// Build a graph of GO terms and the gene products annotated to them.
///
/// Rows without a GO id are ignored. GO term nodes come first, then gene
/// products, each in order of first appearance.
pub fn build_go_graph(
    annotations: &[GoAnnotation],
    options: &GoGraphOptions,
) -> GraphResult<KnowledgeGraph> {
    let mut terms = RecordCollector::new();
    let mut products = Vec::new();
    let mut edges = Vec::new();

    for row in annotations {
        let Some(go_id) = row.go_id.as_deref() else {
            continue;
        };

        if !terms.has_node(go_id) {
            let mut node = Node::new(
                go_id,
                row.go_name.as_deref().unwrap_or(go_id),
                NodeType::GoTerm,
            )
            .with_source(DataSource::GeneOntology);
            if let Some(aspect) = row.go_aspect.as_deref().filter(|a| !a.is_empty()) {
                node = node.with_property("aspect", aspect);
            }
            terms.push_node(node);
        }

        let Some(gene_id) = row.gene_product_id.as_deref() else {
            continue;
        };
        products.push(
            Node::new(gene_id, local_label(gene_id), gene_product_type(gene_id))
                .with_source(DataSource::GeneOntology),
        );

        let mut edge = Edge::new(gene_id, go_id, relation_from_qualifier(row.qualifier.as_deref()));
        if options.include_evidence {
            if let Some(code) = row.evidence_code.as_deref() {
                edge = edge.with_evidence([code]);
            }
        }
        edges.push(edge);
    }

    let mut collector = terms;
    for product in products {
        collector.push_node(product);
    }
    if options.create_annotation_edges {
        for edge in edges {
            collector.push_edge(edge);
        }
    }

    collector.finish(
        &options.name,
        "Knowledge graph from Gene Ontology",
        DataSource::GeneOntology,
    )
}

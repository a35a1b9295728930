use super::generic::RecordCollector;
use super::records::DiseaseTerm;
use crate::error::GraphResult;
use crate::graph::{DataSource, Edge, EdgeType, KnowledgeGraph, Node, NodeType};

#[derive(Debug, Clone)]
pub struct DiseaseGraphOptions {
    pub name: String,
    pub include_xrefs: bool,
    pub include_synonyms: bool,
}

impl Default for DiseaseGraphOptions {
    fn default() -> Self {
        Self {
            name: "DiseaseOntologyGraph".to_string(),
            include_xrefs: true,
            include_synonyms: false,
        }
    }
}

fn disease_node(term: &DiseaseTerm, options: &DiseaseGraphOptions) -> Node {
    let mut node = Node::new(term.doid.as_str(), term.name.as_str(), NodeType::Disease)
        .with_source(DataSource::DiseaseOntology);

    if let Some(definition) = term.definition.as_deref().filter(|d| !d.is_empty()) {
        node = node.with_property("definition", definition);
    }
    if options.include_synonyms && !term.synonyms.is_empty() {
        node = node.with_property("synonyms", term.synonyms.join(";"));
    }
    // Flags are only recorded when set
    for (flag, set) in [
        ("is_obsolete", term.is_obsolete),
        ("has_children", term.has_children),
        ("is_root", term.is_root),
    ] {
        if set {
            node = node.with_property(flag, "true");
        }
    }
    if options.include_xrefs {
        node = node.with_xrefs(term.xrefs.iter().cloned());
    }
    node
}

/// Build a graph of Disease Ontology terms, one DISEASE node per term.
pub fn build_disease_graph(
    terms: &[DiseaseTerm],
    options: &DiseaseGraphOptions,
) -> GraphResult<KnowledgeGraph> {
    let mut collector = RecordCollector::new();
    for term in terms {
        collector.push_node(disease_node(term, options));
    }
    collector.finish(
        &options.name,
        "Knowledge graph from Disease Ontology",
        DataSource::DiseaseOntology,
    )
}

/// Build a disease graph with a child -> parent IS_A edge for every pair of
/// distinct child and parent terms.
pub fn build_disease_graph_with_hierarchy(
    parents: &[DiseaseTerm],
    children: &[DiseaseTerm],
    options: &DiseaseGraphOptions,
) -> GraphResult<KnowledgeGraph> {
    let mut collector = RecordCollector::new();
    for term in parents.iter().chain(children) {
        collector.push_node(disease_node(term, options));
    }

    for child in children {
        for parent in parents {
            if child.doid != parent.doid {
                collector.push_edge(Edge::new(
                    child.doid.as_str(),
                    parent.doid.as_str(),
                    EdgeType::IsA,
                ));
            }
        }
    }

    collector.finish(
        &options.name,
        "Knowledge graph from Disease Ontology with hierarchy",
        DataSource::DiseaseOntology,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancer_terms() -> Vec<DiseaseTerm> {
        vec![
            DiseaseTerm {
                definition: Some("A disease of cellular proliferation".to_string()),
                xrefs: vec!["MESH:D009369".to_string()],
                has_children: true,
                ..DiseaseTerm::new("DOID:162", "cancer")
            },
        ]
    }

    fn child_terms() -> Vec<DiseaseTerm> {
        vec![
            DiseaseTerm {
                synonyms: vec!["breast tumor".to_string(), "mammary cancer".to_string()],
                ..DiseaseTerm::new("DOID:1612", "breast cancer")
            },
            DiseaseTerm::new("DOID:1324", "lung cancer"),
        ]
    }

    #[test]
    fn test_field_mapping() {
        let graph = build_disease_graph(&cancer_terms(), &DiseaseGraphOptions::default()).unwrap();
        assert_eq!(graph.name, "DiseaseOntologyGraph");
        assert_eq!(graph.source, DataSource::DiseaseOntology);

        let node = graph.get_node("DOID:162").unwrap();
        assert_eq!(node.label, "cancer");
        assert_eq!(node.node_type, NodeType::Disease);
        assert_eq!(node.source, DataSource::DiseaseOntology);
        assert_eq!(
            node.get_property("definition"),
            Some("A disease of cellular proliferation")
        );
        assert_eq!(node.get_property("has_children"), Some("true"));
        assert_eq!(node.get_property("is_obsolete"), None);
        assert!(node.xrefs.contains("MESH:D009369"));
    }

    #[test]
    fn test_synonyms_and_xrefs_toggles() {
        let mut terms = child_terms();
        terms[0].xrefs = vec!["NCI:C9335".to_string()];

        let default = build_disease_graph(&terms, &DiseaseGraphOptions::default()).unwrap();
        let node = default.get_node("DOID:1612").unwrap();
        assert_eq!(node.get_property("synonyms"), None);
        assert_eq!(node.xrefs.len(), 1);

        let options = DiseaseGraphOptions {
            include_synonyms: true,
            include_xrefs: false,
            ..Default::default()
        };
        let graph = build_disease_graph(&terms, &options).unwrap();
        let node = graph.get_node("DOID:1612").unwrap();
        assert_eq!(
            node.get_property("synonyms"),
            Some("breast tumor;mammary cancer")
        );
        assert!(node.xrefs.is_empty());
    }

    #[test]
    fn test_repeated_terms_first_wins() {
        let mut terms = child_terms();
        terms.push(DiseaseTerm::new("DOID:1612", "renamed"));
        let graph = build_disease_graph(&terms, &DiseaseGraphOptions::default()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get_node("DOID:1612").unwrap().label, "breast cancer");
    }

    #[test]
    fn test_hierarchy_edges() {
        let mut children = child_terms();
        // The parent also showing up among the children must not yield a self-loop
        children.push(DiseaseTerm::new("DOID:162", "cancer"));

        let graph = build_disease_graph_with_hierarchy(
            &cancer_terms(),
            &children,
            &DiseaseGraphOptions::default(),
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("DOID:1612", "DOID:162", Some(EdgeType::IsA)));
        assert!(graph.has_edge("DOID:1324", "DOID:162", Some(EdgeType::IsA)));
        assert!(!graph.has_edge("DOID:162", "DOID:162", None));
        // Parent record came first, so its richer version is kept
        assert!(graph.get_node("DOID:162").unwrap().get_property("definition").is_some());
    }
}

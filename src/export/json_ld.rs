use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::graph::{EdgeType, KnowledgeGraph, Node, NodeType};

/// Vocabulary and prefix declarations shared by every exported document
pub static BIOKG_CONTEXT: Lazy<Value> = Lazy::new(|| {
    json!({
        "@vocab": "http://www.w3.org/2002/07/owl#",
        "schema": "http://schema.org/",
        "bioschemas": "https://bioschemas.org/",
        "obo": "http://purl.obolibrary.org/obo/",
        "doid": "http://purl.obolibrary.org/obo/DOID_",
        "go": "http://purl.obolibrary.org/obo/GO_",
        "kegg": "https://www.kegg.jp/entry/",
        "reactome": "https://reactome.org/content/detail/",
        "uniprot": "https://www.uniprot.org/uniprot/",
        "id": "@id",
        "type": "@type",
        "label": "rdfs:label",
        "description": "schema:description",
        "xref": { "@id": "obo:hasDbXref", "@type": "@id" },
        "is_a": { "@id": "rdfs:subClassOf", "@type": "@id" },
        "part_of": { "@id": "obo:BFO_0000050", "@type": "@id" },
        "participates_in": { "@id": "obo:RO_0000056", "@type": "@id" },
        "regulates": { "@id": "obo:RO_0002211", "@type": "@id" },
    })
});

#[derive(Debug, Clone)]
pub struct JsonLdOptions {
    pub include_context: bool,
    /// Drop per-node `source`
    pub compact: bool,
    /// When set, node ids are appended to this prefix instead of using CURIEs
    pub base_uri: Option<String>,
}

impl Default for JsonLdOptions {
    fn default() -> Self {
        Self {
            include_context: true,
            compact: false,
            base_uri: None,
        }
    }
}

/// Identifier for a node in the exported document.
///
/// Known id schemes map to the context prefixes; anything else is used as is.
pub fn make_uri(node_id: &str, base_uri: Option<&str>) -> String {
    if let Some(base) = base_uri.filter(|b| !b.is_empty()) {
        return format!("{}{}", base, node_id);
    }

    if let Some(local) = node_id.strip_prefix("DOID:") {
        format!("obo:DOID_{}", local)
    } else if let Some(local) = node_id.strip_prefix("GO:") {
        format!("obo:GO_{}", local)
    } else if node_id.starts_with("R-") {
        format!("reactome:{}", node_id)
    } else if let Some(local) = node_id.strip_prefix("UniProtKB:") {
        format!("uniprot:{}", local)
    } else {
        node_id.to_string()
    }
}

pub fn json_ld_type(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Disease => "obo:DOID_4",
        NodeType::Gene => "bioschemas:Gene",
        NodeType::Protein => "bioschemas:Protein",
        NodeType::Pathway => "bioschemas:BioChemEntity",
        NodeType::GoTerm => "obo:GO_0008150",
        NodeType::Compound => "bioschemas:ChemicalSubstance",
        NodeType::Drug => "schema:Drug",
        NodeType::Reaction => "obo:GO_0003824",
        NodeType::Phenotype => "obo:PATO_0000001",
        NodeType::Organism => "schema:Taxon",
        NodeType::Publication => "schema:ScholarlyArticle",
        NodeType::Other => "schema:Thing",
    }
}

/// Property key an outgoing edge is stored under
pub fn relation_key(relation: EdgeType) -> &'static str {
    match relation {
        EdgeType::IsA
        | EdgeType::PartOf
        | EdgeType::HasPart
        | EdgeType::Regulates
        | EdgeType::PositivelyRegulates
        | EdgeType::NegativelyRegulates
        | EdgeType::ParticipatesIn
        | EdgeType::HasParticipant
        | EdgeType::AssociatedWith
        | EdgeType::InteractsWith
        | EdgeType::Xref
        | EdgeType::SameAs => relation.as_str(),
        _ => "related_to",
    }
}

fn node_object(node: &Node, options: &JsonLdOptions) -> Map<String, Value> {
    let base_uri = options.base_uri.as_deref();
    let mut obj = Map::new();
    obj.insert("@id".into(), Value::String(make_uri(node.id.as_str(), base_uri)));
    obj.insert("@type".into(), Value::String(json_ld_type(node.node_type).into()));
    obj.insert("label".into(), Value::String(node.label.clone()));

    if !options.compact {
        obj.insert("source".into(), Value::String(node.source.to_string()));
    }

    for (key, value) in node.properties.to_map() {
        let key = if key == "definition" {
            "description".to_string()
        } else {
            key
        };
        obj.insert(key, Value::String(value));
    }

    if !node.xrefs.is_empty() {
        obj.insert(
            "xref".into(),
            Value::Array(node.xrefs.iter().cloned().map(Value::String).collect()),
        );
    }

    obj
}

/// Append `value` under `key`, turning a repeated key into an array
fn push_value(obj: &mut Map<String, Value>, key: &str, value: String) {
    match obj.get_mut(key) {
        Some(Value::Array(values)) => values.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None => {
            obj.insert(key.to_string(), Value::String(value));
        }
    }
}

/// Export the graph as a JSON-LD `schema:Dataset` whose `@graph` holds one
/// object per node, with outgoing edges as relation-keyed links.
pub fn to_json_ld(graph: &KnowledgeGraph, options: &JsonLdOptions) -> Value {
    let base_uri = options.base_uri.as_deref();
    let mut result = Map::new();

    if options.include_context {
        result.insert("@context".into(), BIOKG_CONTEXT.clone());
    }

    result.insert("@type".into(), Value::String("schema:Dataset".into()));
    result.insert("schema:name".into(), Value::String(graph.name.clone()));
    if let Some(description) = graph.description.as_deref().filter(|d| !d.is_empty()) {
        result.insert(
            "schema:description".into(),
            Value::String(description.to_string()),
        );
    }
    result.insert("schema:creator".into(), Value::String("biokg".into()));
    result.insert(
        "schema:source".into(),
        Value::String(graph.source.to_string()),
    );

    let mut nodes = Vec::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let mut obj = node_object(node, options);
        for edge in graph.get_outgoing_edges(node.id.as_str()) {
            push_value(
                &mut obj,
                relation_key(edge.relation),
                make_uri(edge.target.as_str(), base_uri),
            );
        }
        nodes.push(Value::Object(obj));
    }
    result.insert("@graph".into(), Value::Array(nodes));

    info!(graph = %graph.name, nodes = graph.node_count(), "Exported JSON-LD");
    Value::Object(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DataSource, Edge};

    fn create_test_kg() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::with_metadata(
            "Diseases",
            Some("disease slice".to_string()),
            DataSource::DiseaseOntology,
        );
        kg.add_node(
            Node::new("DOID:1612", "breast cancer", NodeType::Disease)
                .with_source(DataSource::DiseaseOntology)
                .with_property("definition", "A thoracic cancer")
                .with_property("is_obsolete", "false")
                .with_xrefs(["MESH:D001943"]),
        )
        .unwrap();
        kg.add_node(Node::new("DOID:162", "cancer", NodeType::Disease))
            .unwrap();
        kg.add_node(Node::new("DOID:0050686", "organ system cancer", NodeType::Disease))
            .unwrap();
        kg.add_node(Node::new("R-HSA-1643685", "Disease", NodeType::Pathway))
            .unwrap();
        kg.add_edge(Edge::new("DOID:1612", "DOID:162", EdgeType::IsA))
            .unwrap();
        kg.add_edge(Edge::new("DOID:1612", "DOID:0050686", EdgeType::IsA))
            .unwrap();
        kg.add_edge(Edge::new("DOID:1612", "R-HSA-1643685", EdgeType::Catalyzes))
            .unwrap();
        kg
    }

    #[test]
    fn test_make_uri() {
        assert_eq!(make_uri("DOID:162", None), "obo:DOID_162");
        assert_eq!(make_uri("GO:0008150", None), "obo:GO_0008150");
        assert_eq!(make_uri("R-HSA-109581", None), "reactome:R-HSA-109581");
        assert_eq!(make_uri("UniProtKB:P04637", None), "uniprot:P04637");
        assert_eq!(make_uri("hsa:7157", None), "hsa:7157");
        assert_eq!(
            make_uri("DOID:162", Some("http://example.org/")),
            "http://example.org/DOID:162"
        );
    }

    #[test]
    fn test_to_json_ld_document() {
        let doc = to_json_ld(&create_test_kg(), &JsonLdOptions::default());
        assert_eq!(doc["@type"], "schema:Dataset");
        assert_eq!(doc["schema:name"], "Diseases");
        assert_eq!(doc["schema:description"], "disease slice");
        assert_eq!(doc["schema:creator"], "biokg");
        assert_eq!(doc["schema:source"], "disease_ontology");
        assert_eq!(doc["@context"]["is_a"]["@id"], "rdfs:subClassOf");

        let graph = doc["@graph"].as_array().unwrap();
        assert_eq!(graph.len(), 4);

        let breast = &graph[0];
        assert_eq!(breast["@id"], "obo:DOID_1612");
        assert_eq!(breast["@type"], "obo:DOID_4");
        assert_eq!(breast["label"], "breast cancer");
        assert_eq!(breast["source"], "disease_ontology");
        assert_eq!(breast["description"], "A thoracic cancer");
        assert!(breast.get("definition").is_none());
        assert_eq!(breast["is_obsolete"], "false");
        assert_eq!(breast["xref"], json!(["MESH:D001943"]));
        assert_eq!(breast["is_a"], json!(["obo:DOID_162", "obo:DOID_0050686"]));
        assert_eq!(breast["related_to"], "reactome:R-HSA-1643685");

        assert!(graph[1].get("is_a").is_none());
        assert_eq!(graph[3]["@type"], "bioschemas:BioChemEntity");
    }

    #[test]
    fn test_to_json_ld_compact_without_context() {
        let options = JsonLdOptions {
            include_context: false,
            compact: true,
            base_uri: Some("http://example.org/kg/".to_string()),
        };
        let doc = to_json_ld(&create_test_kg(), &options);
        assert!(doc.get("@context").is_none());

        let node = &doc["@graph"][1];
        assert_eq!(node["@id"], "http://example.org/kg/DOID:162");
        assert!(node.get("source").is_none());
        assert_eq!(doc["@graph"][0]["is_a"][0], "http://example.org/kg/DOID:162");
    }

    #[test]
    fn test_relation_key_fallback() {
        assert_eq!(relation_key(EdgeType::PartOf), "part_of");
        assert_eq!(relation_key(EdgeType::Encodes), "related_to");
        assert_eq!(relation_key(EdgeType::RelatedTo), "related_to");
    }
}

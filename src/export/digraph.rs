use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::graph::KnowledgeGraph;

#[derive(Debug, Clone, Copy)]
pub struct DiGraphOptions {
    pub include_properties: bool,
    pub include_xrefs: bool,
}

impl Default for DiGraphOptions {
    fn default() -> Self {
        Self {
            include_properties: true,
            include_xrefs: true,
        }
    }
}

/// Node weight of the exported graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeWeight {
    pub id: String,
    pub attributes: BTreeMap<String, Value>,
}

/// Edge weight of the exported graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeWeight {
    pub relation: String,
    pub weight: f64,
    pub attributes: BTreeMap<String, Value>,
}

/// Graph-level attributes plus the petgraph projection itself
#[derive(Debug, Clone)]
pub struct ExportedDiGraph {
    pub attributes: BTreeMap<String, Value>,
    pub graph: DiGraph<NodeWeight, EdgeWeight>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl ExportedDiGraph {
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Node-link JSON (`directed`, `multigraph`, `graph`, `nodes`, `links`),
    /// the interchange shape read by most graph-analysis libraries
    pub fn to_node_link(&self) -> Value {
        let nodes: Vec<Value> = self
            .graph
            .node_weights()
            .map(|node| {
                let mut obj: Map<String, Value> = node
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                obj.insert("id".into(), Value::String(node.id.clone()));
                Value::Object(obj)
            })
            .collect();

        let links: Vec<Value> = self
            .graph
            .edge_references()
            .map(|edge| {
                let weight = edge.weight();
                let mut obj: Map<String, Value> = weight
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                obj.insert(
                    "source".into(),
                    Value::String(self.graph[edge.source()].id.clone()),
                );
                obj.insert(
                    "target".into(),
                    Value::String(self.graph[edge.target()].id.clone()),
                );
                obj.insert("relation".into(), Value::String(weight.relation.clone()));
                obj.insert("weight".into(), json!(weight.weight));
                Value::Object(obj)
            })
            .collect();

        json!({
            "directed": true,
            "multigraph": true,
            "graph": self.attributes,
            "nodes": nodes,
            "links": links,
        })
    }
}

fn insert_properties<'a>(
    attributes: &mut BTreeMap<String, Value>,
    properties: impl Iterator<Item = (&'a str, &'a str)>,
) {
    for (key, value) in properties {
        attributes.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// Project the graph into a `petgraph` directed graph.
///
/// Node attributes always hold `label`, `node_type` and `source`; properties
/// and xrefs are added as requested. Parallel edges are kept.
pub fn to_digraph(graph: &KnowledgeGraph, options: &DiGraphOptions) -> ExportedDiGraph {
    let mut attributes = BTreeMap::new();
    attributes.insert("name".to_string(), Value::String(graph.name.clone()));
    attributes.insert(
        "source".to_string(),
        Value::String(graph.source.to_string()),
    );
    if let Some(description) = &graph.description {
        attributes.insert(
            "description".to_string(),
            Value::String(description.clone()),
        );
    }

    let mut digraph = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    let mut node_indices = HashMap::with_capacity(graph.node_count());

    for node in graph.nodes() {
        let mut attrs = BTreeMap::new();
        attrs.insert("label".to_string(), Value::String(node.label.clone()));
        attrs.insert(
            "node_type".to_string(),
            Value::String(node.node_type.to_string()),
        );
        attrs.insert("source".to_string(), Value::String(node.source.to_string()));
        if options.include_properties {
            insert_properties(&mut attrs, node.properties.iter());
        }
        if options.include_xrefs && !node.xrefs.is_empty() {
            attrs.insert(
                "xrefs".to_string(),
                Value::Array(node.xrefs.iter().cloned().map(Value::String).collect()),
            );
        }

        let index = digraph.add_node(NodeWeight {
            id: node.id.to_string(),
            attributes: attrs,
        });
        node_indices.insert(node.id.to_string(), index);
    }

    for edge in graph.edges() {
        // Both endpoints are graph nodes, so both indices exist
        let (Some(&a), Some(&b)) = (
            node_indices.get(edge.source.as_str()),
            node_indices.get(edge.target.as_str()),
        ) else {
            continue;
        };

        let mut attrs = BTreeMap::new();
        if options.include_properties {
            insert_properties(&mut attrs, edge.properties.iter());
        }
        if !edge.evidence.is_empty() {
            attrs.insert(
                "evidence".to_string(),
                Value::Array(edge.evidence.iter().cloned().map(Value::String).collect()),
            );
        }

        digraph.add_edge(
            a,
            b,
            EdgeWeight {
                relation: edge.relation.to_string(),
                weight: edge.weight,
                attributes: attrs,
            },
        );
    }

    ExportedDiGraph {
        attributes,
        graph: digraph,
        node_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeType, Node, NodeType};
    use petgraph::algo::has_path_connecting;

    fn create_test_kg() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new("Export");
        kg.description = Some("digraph export".to_string());
        kg.add_node(
            Node::new("TP53", "TP53", NodeType::Gene)
                .with_property("chromosome", "17")
                .with_xrefs(["HGNC:11998"]),
        )
        .unwrap();
        kg.add_node(Node::new("MDM2", "MDM2", NodeType::Gene)).unwrap();
        kg.add_node(Node::new("R-HSA-69620", "Checkpoints", NodeType::Pathway))
            .unwrap();
        kg.add_edge(
            Edge::new("MDM2", "TP53", EdgeType::NegativelyRegulates)
                .with_weight(0.9)
                .with_evidence(["IDA"])
                .with_property("pmid", "9153395"),
        )
        .unwrap();
        kg.add_edge(Edge::new("TP53", "R-HSA-69620", EdgeType::ParticipatesIn))
            .unwrap();
        kg
    }

    #[test]
    fn test_to_digraph() {
        let exported = to_digraph(&create_test_kg(), &DiGraphOptions::default());
        assert_eq!(exported.graph.node_count(), 3);
        assert_eq!(exported.graph.edge_count(), 2);
        assert_eq!(exported.attributes["name"], "Export");
        assert_eq!(exported.attributes["description"], "digraph export");

        let tp53 = &exported.graph[exported.node_index("TP53").unwrap()];
        assert_eq!(tp53.attributes["node_type"], "gene");
        assert_eq!(tp53.attributes["chromosome"], "17");
        assert_eq!(tp53.attributes["xrefs"], serde_json::json!(["HGNC:11998"]));

        let mdm2 = exported.node_index("MDM2").unwrap();
        let edge = exported.graph.edges(mdm2).next().unwrap();
        assert_eq!(edge.weight().relation, "negatively_regulates");
        assert_eq!(edge.weight().weight, 0.9);
        assert_eq!(edge.weight().attributes["pmid"], "9153395");
        assert_eq!(edge.weight().attributes["evidence"], serde_json::json!(["IDA"]));

        let pathway = exported.node_index("R-HSA-69620").unwrap();
        assert!(has_path_connecting(&exported.graph, mdm2, pathway, None));
    }

    #[test]
    fn test_node_link_json() {
        let value = to_digraph(&create_test_kg(), &DiGraphOptions::default()).to_node_link();
        assert_eq!(value["directed"], true);
        assert_eq!(value["graph"]["name"], "Export");
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["nodes"][0]["id"], "TP53");
        assert_eq!(value["nodes"][0]["chromosome"], "17");

        let link = &value["links"][0];
        assert_eq!(link["source"], "MDM2");
        assert_eq!(link["target"], "TP53");
        assert_eq!(link["relation"], "negatively_regulates");
        assert_eq!(link["weight"], 0.9);
    }

    #[test]
    fn test_to_digraph_without_attributes() {
        let options = DiGraphOptions {
            include_properties: false,
            include_xrefs: false,
        };
        let exported = to_digraph(&create_test_kg(), &options);
        let tp53 = &exported.graph[exported.node_index("TP53").unwrap()];
        assert!(!tp53.attributes.contains_key("chromosome"));
        assert!(!tp53.attributes.contains_key("xrefs"));
        assert_eq!(tp53.attributes.len(), 3);
    }
}

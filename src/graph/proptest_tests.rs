//! Property-based tests for the graph container.

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

use crate::builders::merge_graphs;
use crate::error::GraphError;
use crate::graph::{DataSource, Edge, EdgeKey, EdgeType, KnowledgeGraph, Node, NodeType, Properties};

/// Strategy for generating arbitrary `NodeType` values.
fn arb_node_type() -> impl Strategy<Value = NodeType> {
    prop::sample::select(NodeType::ALL.to_vec())
}

/// Strategy for generating arbitrary `EdgeType` values.
fn arb_edge_type() -> impl Strategy<Value = EdgeType> {
    prop::sample::select(EdgeType::ALL.to_vec())
}

fn arb_properties() -> impl Strategy<Value = Properties> {
    prop::collection::vec(("[a-z_]{1,8}", ".{0,12}"), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Strategy for a node with id `N{index}`.
fn arb_node(index: usize) -> impl Strategy<Value = Node> {
    (
        "[a-zA-Z ]{0,16}",
        arb_node_type(),
        prop::sample::select(DataSource::ALL.to_vec()),
        arb_properties(),
        prop::collection::btree_set("[A-Z]{2,5}:[0-9]{1,6}", 0..3),
    )
        .prop_map(move |(label, node_type, source, properties, xrefs)| {
            Node::new(format!("N{index}"), label, node_type)
                .with_source(source)
                .with_properties(properties)
                .with_xrefs(xrefs)
        })
}

/// Strategy for any finite weight, subnormals and signed zeros included.
fn arb_weight() -> impl Strategy<Value = f64> {
    use prop::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

/// Strategy for a graph over up to `max_nodes` nodes with edges among them.
fn arb_graph(max_nodes: usize) -> impl Strategy<Value = KnowledgeGraph> {
    (1..=max_nodes)
        .prop_flat_map(|n| {
            let nodes = (0..n).map(arb_node).collect::<Vec<_>>();
            let edges = prop::collection::vec(
                (
                    0..n,
                    0..n,
                    arb_edge_type(),
                    arb_weight(),
                    prop::collection::btree_set("[A-Z]{2,3}", 0..3),
                    arb_properties(),
                ),
                0..n * 3,
            );
            (nodes, edges)
        })
        .prop_map(|(nodes, edges)| {
            let mut graph = KnowledgeGraph::new("Generated");
            for node in nodes {
                graph.add_node(node).expect("generated ids are unique");
            }
            for (s, t, relation, weight, evidence, properties) in edges {
                let mut edge = Edge::new(format!("N{s}"), format!("N{t}"), relation)
                    .with_weight(weight)
                    .with_evidence(evidence);
                edge.properties = properties;
                graph.add_edge(edge).expect("generated endpoints exist");
            }
            graph
        })
}

proptest! {
    /// `add_edge` fails exactly when an endpoint is absent.
    #[test]
    fn add_edge_requires_both_endpoints(
        present in prop::collection::btree_set(0usize..8, 0..8),
        pairs in prop::collection::vec((0usize..8, 0usize..8), 1..20),
    ) {
        let mut graph = KnowledgeGraph::new("Endpoints");
        for i in &present {
            graph.add_node(Node::new(format!("N{i}"), "n", NodeType::Other)).expect("unique");
        }

        for (s, t) in pairs {
            let result = graph.add_edge(Edge::new(format!("N{s}"), format!("N{t}"), EdgeType::RelatedTo));
            let both_present = present.contains(&s) && present.contains(&t);
            match result {
                Ok(()) => prop_assert!(both_present),
                Err(GraphError::MissingEndpoint { missing, .. }) => {
                    prop_assert!(!both_present);
                    let missing: usize = missing.as_str()[1..].parse().expect("generated id");
                    prop_assert!(!present.contains(&missing));
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        for edge in graph.edges() {
            prop_assert!(graph.has_node(edge.source.as_str()));
            prop_assert!(graph.has_node(edge.target.as_str()));
        }
    }

    #[test]
    fn dict_roundtrip_preserves_everything(graph in arb_graph(12)) {
        let restored = KnowledgeGraph::from_dict(graph.to_dict()).expect("round trip should succeed");

        prop_assert_eq!(restored.node_count(), graph.node_count());
        for node in graph.nodes() {
            let other = restored.get_node(node.id.as_str());
            prop_assert!(other.is_some());
            prop_assert!(node.attributes_eq(other.expect("checked above")));
        }

        prop_assert_eq!(restored.edge_count(), graph.edge_count());
        for (a, b) in graph.edges().zip(restored.edges()) {
            prop_assert!(a.attributes_eq(b));
        }
    }

    #[test]
    fn json_roundtrip_preserves_record(graph in arb_graph(8)) {
        let json = graph.to_json().expect("serialize");
        let restored = KnowledgeGraph::from_json(&json).expect("deserialize");
        prop_assert_eq!(restored.to_dict(), graph.to_dict());

        let weights: Vec<u64> = graph.edges().map(|e| e.weight.to_bits()).collect();
        let restored_weights: Vec<u64> = restored.edges().map(|e| e.weight.to_bits()).collect();
        prop_assert_eq!(restored_weights, weights);
    }

    #[test]
    fn merge_with_self_is_idempotent(graph in arb_graph(10)) {
        let merged = merge_graphs(&[&graph, &graph], "Self", None);

        let ids: BTreeSet<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        let merged_ids: BTreeSet<&str> = merged.nodes().map(|n| n.id.as_str()).collect();
        prop_assert_eq!(ids, merged_ids);

        let distinct: HashSet<EdgeKey> = graph.edges().map(Edge::key).collect();
        prop_assert_eq!(merged.edge_count(), distinct.len());
        let merged_keys: HashSet<EdgeKey> = merged.edges().map(Edge::key).collect();
        prop_assert_eq!(merged_keys, distinct);
    }

    #[test]
    fn subgraph_is_induced(graph in arb_graph(10), keep in prop::collection::btree_set(0usize..10, 0..10)) {
        let ids: Vec<String> = keep.iter().map(|i| format!("N{i}")).collect();
        let sub = graph.subgraph(&ids);

        for node in sub.nodes() {
            prop_assert!(ids.contains(&node.id.0));
        }
        let expected = graph
            .edges()
            .filter(|e| ids.contains(&e.source.0) && ids.contains(&e.target.0))
            .count();
        prop_assert_eq!(sub.edge_count(), expected);
    }
}

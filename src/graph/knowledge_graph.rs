use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::entity::{DataSource, Node, NodeId, NodeType};
use super::filter::{EdgeFilter, NodeFilter};
use super::relationship::{AdjacencyIndex, Direction, Edge, EdgeKey, EdgeType};
use crate::error::{GraphError, GraphResult};

/// In-memory biological knowledge graph.
///
/// Nodes are unique by id and kept in insertion order. Edges may only connect
/// nodes already present in the graph; parallel edges with the same
/// `(source, target, relation)` are allowed here and deduplicated by
/// [`KnowledgeGraph::update`] and the merge builders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "GraphRecord", try_from = "GraphRecord")]
pub struct KnowledgeGraph {
    pub name: String,
    pub description: Option<String>,
    pub source: DataSource,

    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,

    edges: Vec<Edge>,
    adjacency: AdjacencyIndex,
}

/// Plain nested representation used for lossless round trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: DataSource,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new("KnowledgeGraph")
    }
}

impl KnowledgeGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_metadata(name, None, DataSource::Custom)
    }

    pub fn with_metadata(
        name: impl Into<String>,
        description: Option<String>,
        source: DataSource,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            source,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            adjacency: AdjacencyIndex::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.node_index.contains_key(node_id)
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.has_node(node.id.as_str())
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    // Node operations

    /// Add a node; fails if a node with the same id is already present
    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.node_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Add several nodes, stopping at the first duplicate
    pub fn add_nodes<I: IntoIterator<Item = Node>>(&mut self, nodes: I) -> GraphResult<usize> {
        let mut count = 0;
        for node in nodes {
            self.add_node(node)?;
            count += 1;
        }
        Ok(count)
    }

    /// Get a node by its ID
    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        self.node_index.get(node_id).map(|&i| &self.nodes[i])
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, node_id: &str) -> Option<Node> {
        let position = self.node_index.remove(node_id)?;
        let node = self.nodes.remove(position);

        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let before = self.edges.len();
        self.edges
            .retain(|e| e.source.as_str() != node_id && e.target.as_str() != node_id);
        if self.edges.len() != before {
            self.adjacency = AdjacencyIndex::rebuild(&self.edges);
        }

        Some(node)
    }

    // Edge operations

    /// Add an edge; both endpoints must already be nodes of this graph and
    /// the weight must be finite
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if !edge.weight.is_finite() {
            return Err(GraphError::InvalidValue {
                kind: "edge weight",
                value: edge.weight.to_string(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.has_node(endpoint.as_str()) {
                return Err(GraphError::MissingEndpoint {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        self.push_edge(edge);
        Ok(())
    }

    /// Add several edges, stopping at the first missing endpoint
    pub fn add_edges<I: IntoIterator<Item = Edge>>(&mut self, edges: I) -> GraphResult<usize> {
        let mut count = 0;
        for edge in edges {
            self.add_edge(edge)?;
            count += 1;
        }
        Ok(count)
    }

    fn push_edge(&mut self, edge: Edge) {
        self.adjacency.insert(&edge, self.edges.len());
        self.edges.push(edge);
    }

    /// Remove every edge with the given `(source, target, relation)` triple
    pub fn remove_edge(&mut self, key: &EdgeKey) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| {
            !(e.source == key.source && e.target == key.target && e.relation == key.relation)
        });
        let removed = before - self.edges.len();
        if removed > 0 {
            self.adjacency = AdjacencyIndex::rebuild(&self.edges);
        }
        removed
    }

    /// Get all outgoing edges of a node, in insertion order
    pub fn get_outgoing_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.adjacency
            .outgoing(node_id)
            .iter()
            .map(|&i| &self.edges[i])
            .collect()
    }

    /// Get all incoming edges of a node, in insertion order
    pub fn get_incoming_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.adjacency
            .incoming(node_id)
            .iter()
            .map(|&i| &self.edges[i])
            .collect()
    }

    /// First edge from `source` to `target`, optionally of a given relation
    pub fn get_edge(
        &self,
        source: &str,
        target: &str,
        relation: Option<EdgeType>,
    ) -> Option<&Edge> {
        self.adjacency
            .outgoing(source)
            .iter()
            .map(|&i| &self.edges[i])
            .find(|e| {
                e.target.as_str() == target && relation.map_or(true, |r| e.relation == r)
            })
    }

    pub fn has_edge(&self, source: &str, target: &str, relation: Option<EdgeType>) -> bool {
        self.get_edge(source, target, relation).is_some()
    }

    /// Distinct neighbour ids; outgoing targets first, then incoming sources.
    /// Unknown ids yield an empty list.
    pub fn get_neighbors(&self, node_id: &str, direction: Direction) -> Vec<&NodeId> {
        let mut seen = HashSet::new();
        let mut neighbors = Vec::new();

        if direction.includes_outgoing() {
            for &i in self.adjacency.outgoing(node_id) {
                let target = &self.edges[i].target;
                if seen.insert(target) {
                    neighbors.push(target);
                }
            }
        }

        if direction.includes_incoming() {
            for &i in self.adjacency.incoming(node_id) {
                let source = &self.edges[i].source;
                if seen.insert(source) {
                    neighbors.push(source);
                }
            }
        }

        neighbors
    }

    /// Number of incident edges; a self-loop counts once in each direction
    pub fn get_degree(&self, node_id: &str, direction: Direction) -> usize {
        let mut degree = 0;
        if direction.includes_outgoing() {
            degree += self.adjacency.outgoing(node_id).len();
        }
        if direction.includes_incoming() {
            degree += self.adjacency.incoming(node_id).len();
        }
        degree
    }

    // Filtering

    pub fn filter_nodes(&self, filter: &NodeFilter<'_>) -> Vec<&Node> {
        self.nodes.iter().filter(|n| filter.matches(n)).collect()
    }

    pub fn filter_edges(&self, filter: &EdgeFilter<'_>) -> Vec<&Edge> {
        self.edges.iter().filter(|e| filter.matches(e)).collect()
    }

    pub fn get_nodes_by_type(&self, node_type: NodeType) -> Vec<&Node> {
        self.filter_nodes(&NodeFilter::new().node_type(node_type))
    }

    pub fn get_edges_by_relation(&self, relation: EdgeType) -> Vec<&Edge> {
        self.filter_edges(&EdgeFilter::new().relation(relation))
    }

    /// Nodes whose label matches `pattern` as a regex, or contains it
    /// literally when it is not a valid regex
    pub fn find_nodes_by_label(&self, pattern: &str) -> Vec<&Node> {
        match Regex::new(pattern) {
            Ok(regex) => self
                .nodes
                .iter()
                .filter(|n| regex.is_match(&n.label))
                .collect(),
            Err(_) => self
                .nodes
                .iter()
                .filter(|n| n.label.contains(pattern))
                .collect(),
        }
    }

    // Subgraphs and merging

    /// Induced subgraph: the listed nodes that exist, and every edge with
    /// both endpoints among them
    pub fn subgraph<I>(&self, node_ids: I) -> KnowledgeGraph
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let wanted: HashSet<String> = node_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();

        let mut subgraph = KnowledgeGraph::with_metadata(
            format!("{}_subgraph", self.name),
            Some(format!("Subgraph of {}", self.name)),
            self.source,
        );

        for node in self.nodes.iter().filter(|n| wanted.contains(n.id.as_str())) {
            subgraph.index_node(node.clone());
        }
        for edge in self.edges.iter().filter(|e| {
            wanted.contains(e.source.as_str()) && wanted.contains(e.target.as_str())
        }) {
            subgraph.push_edge(edge.clone());
        }

        subgraph
    }

    fn index_node(&mut self, node: Node) {
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Merge `other` into this graph in place.
    ///
    /// Nodes already present win over `other`'s version of the same id; an
    /// edge is added only if no edge with its `(source, target, relation)`
    /// is present yet. Returns the number of nodes plus edges added.
    pub fn update(&mut self, other: &KnowledgeGraph) -> usize {
        let mut added = 0;

        for node in &other.nodes {
            if !self.has_node(node.id.as_str()) {
                self.index_node(node.clone());
                added += 1;
            }
        }

        let mut present: HashSet<EdgeKey> = self.edges.iter().map(Edge::key).collect();
        for edge in &other.edges {
            // Endpoints exist: `other` holds them, and all of its nodes are here now
            if present.insert(edge.key()) {
                self.push_edge(edge.clone());
                added += 1;
            }
        }

        tracing::debug!(
            "Merged '{}' into '{}': {} new nodes and edges",
            other.name,
            self.name,
            added
        );
        added
    }

    /// New graph holding this graph merged with `other` (this graph wins)
    pub fn merge(&self, other: &KnowledgeGraph) -> KnowledgeGraph {
        let mut merged = KnowledgeGraph::with_metadata(
            format!("{}+{}", self.name, other.name),
            Some(format!(
                "Merged graph from {} and {}",
                self.name, other.name
            )),
            self.source,
        );
        merged.update(self);
        merged.update(other);
        merged
    }

    // Statistics

    pub fn get_node_type_counts(&self) -> BTreeMap<NodeType, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.node_type).or_insert(0) += 1;
        }
        counts
    }

    pub fn get_edge_type_counts(&self) -> BTreeMap<EdgeType, usize> {
        let mut counts = BTreeMap::new();
        for edge in &self.edges {
            *counts.entry(edge.relation).or_insert(0) += 1;
        }
        counts
    }

    /// Human-readable overview: name, counts and type histograms
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("KnowledgeGraph: {}", self.name)];
        if let Some(description) = &self.description {
            lines.push(format!("Description: {}", description));
        }
        lines.push(format!("Nodes: {}", self.node_count()));
        lines.push(format!("Edges: {}", self.edge_count()));

        let mut node_counts: Vec<_> = self.get_node_type_counts().into_iter().collect();
        if !node_counts.is_empty() {
            node_counts.sort_by(|a, b| b.1.cmp(&a.1));
            lines.push(String::new());
            lines.push("Node types:".to_string());
            for (node_type, count) in node_counts {
                lines.push(format!("  {}: {}", node_type, count));
            }
        }

        let mut edge_counts: Vec<_> = self.get_edge_type_counts().into_iter().collect();
        if !edge_counts.is_empty() {
            edge_counts.sort_by(|a, b| b.1.cmp(&a.1));
            lines.push(String::new());
            lines.push("Edge types:".to_string());
            for (edge_type, count) in edge_counts {
                lines.push(format!("  {}: {}", edge_type, count));
            }
        }

        lines.join("\n")
    }

    // Serialization

    pub fn to_dict(&self) -> GraphRecord {
        GraphRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            source: self.source,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Rebuild a graph from its record; nodes are inserted before edges
    pub fn from_dict(record: GraphRecord) -> GraphResult<Self> {
        let mut graph =
            KnowledgeGraph::with_metadata(record.name, record.description, record.source);
        graph.add_nodes(record.nodes)?;
        graph.add_edges(record.edges)?;
        Ok(graph)
    }

    pub fn to_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GraphResult<Self> {
        let record: GraphRecord = serde_json::from_str(json)?;
        Self::from_dict(record)
    }
}

impl From<KnowledgeGraph> for GraphRecord {
    fn from(graph: KnowledgeGraph) -> Self {
        GraphRecord {
            name: graph.name,
            description: graph.description,
            source: graph.source,
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

impl TryFrom<GraphRecord> for KnowledgeGraph {
    type Error = GraphError;

    fn try_from(record: GraphRecord) -> Result<Self, Self::Error> {
        KnowledgeGraph::from_dict(record)
    }
}

impl fmt::Display for KnowledgeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KnowledgeGraph(name='{}', nodes={}, edges={})",
            self.name,
            self.node_count(),
            self.edge_count()
        )
    }
}

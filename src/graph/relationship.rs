use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::entity::{NodeId, Properties};
use crate::error::GraphError;

/// Relationship type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    // Ontology
    IsA,
    PartOf,
    HasPart,

    // Regulation
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,

    // Participation
    ParticipatesIn,
    HasParticipant,
    Catalyzes,
    Produces,
    Consumes,

    // Association
    AssociatedWith,
    InteractsWith,
    Targets,

    // Cross-reference
    Xref,
    SameAs,

    // Sequence
    Encodes,
    Transcribes,
    Translates,

    #[default]
    RelatedTo,
    Other,
}

impl EdgeType {
    pub const ALL: [EdgeType; 21] = [
        EdgeType::IsA,
        EdgeType::PartOf,
        EdgeType::HasPart,
        EdgeType::Regulates,
        EdgeType::PositivelyRegulates,
        EdgeType::NegativelyRegulates,
        EdgeType::ParticipatesIn,
        EdgeType::HasParticipant,
        EdgeType::Catalyzes,
        EdgeType::Produces,
        EdgeType::Consumes,
        EdgeType::AssociatedWith,
        EdgeType::InteractsWith,
        EdgeType::Targets,
        EdgeType::Xref,
        EdgeType::SameAs,
        EdgeType::Encodes,
        EdgeType::Transcribes,
        EdgeType::Translates,
        EdgeType::RelatedTo,
        EdgeType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::IsA => "is_a",
            EdgeType::PartOf => "part_of",
            EdgeType::HasPart => "has_part",
            EdgeType::Regulates => "regulates",
            EdgeType::PositivelyRegulates => "positively_regulates",
            EdgeType::NegativelyRegulates => "negatively_regulates",
            EdgeType::ParticipatesIn => "participates_in",
            EdgeType::HasParticipant => "has_participant",
            EdgeType::Catalyzes => "catalyzes",
            EdgeType::Produces => "produces",
            EdgeType::Consumes => "consumes",
            EdgeType::AssociatedWith => "associated_with",
            EdgeType::InteractsWith => "interacts_with",
            EdgeType::Targets => "targets",
            EdgeType::Xref => "xref",
            EdgeType::SameAs => "same_as",
            EdgeType::Encodes => "encodes",
            EdgeType::Transcribes => "transcribes",
            EdgeType::Translates => "translates",
            EdgeType::RelatedTo => "related_to",
            EdgeType::Other => "other",
        }
    }

    /// Relationship type name for property-graph databases ("is_a" -> "IS_A")
    pub fn graph_type(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        EdgeType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| GraphError::InvalidValue {
                kind: "relation",
                value: s.to_string(),
            })
    }
}

/// Which edges to follow from a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
    #[default]
    Both,
}

impl Direction {
    pub fn includes_outgoing(&self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    pub fn includes_incoming(&self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}

impl FromStr for Direction {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "out" | "outgoing" => Ok(Direction::Outgoing),
            "in" | "incoming" => Ok(Direction::Incoming),
            "both" | "all" => Ok(Direction::Both),
            _ => Err(GraphError::InvalidValue {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Deduplication key of an edge: `(source, target, relation)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: EdgeType,
}

/// Directed, typed relationship between two nodes.
///
/// Equality and hashing use the `(source, target, relation)` triple only, so
/// two edges that differ just in weight, evidence or properties are duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub relation: EdgeType,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub evidence: BTreeSet<String>,
    #[serde(default)]
    pub properties: Properties,
}

fn default_weight() -> f64 {
    1.0
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, relation: EdgeType) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation,
            weight: default_weight(),
            evidence: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// New edge whose evidence is the union of the current set and `evidence`
    pub fn with_evidence<I, S>(mut self, evidence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence.extend(evidence.into_iter().map(Into::into));
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            target: self.target.clone(),
            relation: self.relation,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Field-by-field comparison, unlike `==` which compares the triple only
    pub fn attributes_eq(&self, other: &Edge) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.relation == other.relation
            && self.weight == other.weight
            && self.evidence == other.evidence
            && self.properties == other.properties
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.relation == other.relation
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.relation.hash(state);
    }
}

/// Forward and reverse adjacency over a slice of edges, by edge position
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    outgoing: HashMap<NodeId, Vec<usize>>,
    incoming: HashMap<NodeId, Vec<usize>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for `edges` from scratch
    pub fn rebuild(edges: &[Edge]) -> Self {
        let mut index = Self::new();
        for (position, edge) in edges.iter().enumerate() {
            index.insert(edge, position);
        }
        index
    }

    /// Record the edge stored at `position`
    pub fn insert(&mut self, edge: &Edge, position: usize) {
        self.outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(position);
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .push(position);
    }

    pub fn outgoing(&self, node_id: &str) -> &[usize] {
        self.outgoing.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming(&self, node_id: &str) -> &[usize] {
        self.incoming.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

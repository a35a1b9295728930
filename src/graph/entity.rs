use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::GraphError;

/// Unique identifier for a node (e.g. "DOID:162", "GO:0008150")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// Kind of biological entity a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Gene,
    Protein,
    Disease,
    Pathway,
    GoTerm,
    Reaction,
    Compound,
    Drug,
    Phenotype,
    Organism,
    Publication,
    #[default]
    Other,
}

impl NodeType {
    pub const ALL: [NodeType; 12] = [
        NodeType::Gene,
        NodeType::Protein,
        NodeType::Disease,
        NodeType::Pathway,
        NodeType::GoTerm,
        NodeType::Reaction,
        NodeType::Compound,
        NodeType::Drug,
        NodeType::Phenotype,
        NodeType::Organism,
        NodeType::Publication,
        NodeType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Gene => "gene",
            NodeType::Protein => "protein",
            NodeType::Disease => "disease",
            NodeType::Pathway => "pathway",
            NodeType::GoTerm => "go_term",
            NodeType::Reaction => "reaction",
            NodeType::Compound => "compound",
            NodeType::Drug => "drug",
            NodeType::Phenotype => "phenotype",
            NodeType::Organism => "organism",
            NodeType::Publication => "publication",
            NodeType::Other => "other",
        }
    }

    /// Label used for this type by property-graph databases ("go_term" -> "GoTerm")
    pub fn graph_label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| GraphError::InvalidValue {
                kind: "node type",
                value: s.to_string(),
            })
    }
}

/// External database a node was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    DiseaseOntology,
    GeneOntology,
    Reactome,
    Kegg,
    #[serde(rename = "quickgo")]
    QuickGo,
    Uniprot,
    Ensembl,
    Pubchem,
    Chembl,
    #[default]
    Custom,
}

impl DataSource {
    pub const ALL: [DataSource; 10] = [
        DataSource::DiseaseOntology,
        DataSource::GeneOntology,
        DataSource::Reactome,
        DataSource::Kegg,
        DataSource::QuickGo,
        DataSource::Uniprot,
        DataSource::Ensembl,
        DataSource::Pubchem,
        DataSource::Chembl,
        DataSource::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::DiseaseOntology => "disease_ontology",
            DataSource::GeneOntology => "gene_ontology",
            DataSource::Reactome => "reactome",
            DataSource::Kegg => "kegg",
            DataSource::QuickGo => "quickgo",
            DataSource::Uniprot => "uniprot",
            DataSource::Ensembl => "ensembl",
            DataSource::Pubchem => "pubchem",
            DataSource::Chembl => "chembl",
            DataSource::Custom => "custom",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        DataSource::ALL
            .into_iter()
            .find(|d| d.as_str() == needle)
            .ok_or_else(|| GraphError::InvalidValue {
                kind: "data source",
                value: s.to_string(),
            })
    }
}

/// Hashable, order-independent bag of `(key, value)` pairs.
///
/// Pairs are kept sorted, so two bags built from the same pairs in a
/// different order compare and hash equal. Duplicate keys are allowed;
/// [`Properties::get`] returns the smallest value stored under a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "PropertiesRepr", into = "Vec<(String, String)>")]
pub struct Properties(BTreeSet<(String, String)>);

impl Properties {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a pair, keeping any existing pairs under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert((key.into(), value.into()));
    }

    /// Replace every pair under `key` with a single `(key, value)` pair
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.0.retain(|(k, _)| *k != key);
        self.0.insert((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collapse into a map; for duplicate keys the largest value wins
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0.iter().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Properties> for Vec<(String, String)> {
    fn from(props: Properties) -> Self {
        props.0.into_iter().collect()
    }
}

/// Accepted wire shapes: a list of pairs, or a JSON object whose
/// non-string values are stringified.
#[derive(Deserialize)]
#[serde(untagged)]
enum PropertiesRepr {
    Pairs(Vec<(String, String)>),
    Map(BTreeMap<String, serde_json::Value>),
}

impl From<PropertiesRepr> for Properties {
    fn from(repr: PropertiesRepr) -> Self {
        match repr {
            PropertiesRepr::Pairs(pairs) => pairs.into_iter().collect(),
            PropertiesRepr::Map(map) => map
                .into_iter()
                .map(|(k, v)| match v {
                    serde_json::Value::String(s) => (k, s),
                    other => (k, other.to_string()),
                })
                .collect(),
        }
    }
}

/// A biological entity. Identity (equality and hashing) is the `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub source: DataSource,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub xrefs: BTreeSet<String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            source: DataSource::Custom,
            properties: Properties::new(),
            xrefs: BTreeSet::new(),
        }
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// New node with `key` set to `value`, replacing earlier values for `key`
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// New node whose xrefs are the union of the current ones and `xrefs`
    pub fn with_xrefs<I, S>(mut self, xrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xrefs.extend(xrefs.into_iter().map(Into::into));
        self
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Field-by-field comparison, unlike `==` which compares ids only
    pub fn attributes_eq(&self, other: &Node) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.node_type == other.node_type
            && self.source == other.source
            && self.properties == other.properties
            && self.xrefs == other.xrefs
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

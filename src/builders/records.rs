//! Plain input records handed to the source-specific builders.
//!
//! These mirror the JSON shapes returned by the public Disease Ontology,
//! QuickGO, Reactome and KEGG services closely enough to be deserialized
//! straight from a response body.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One Disease Ontology term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseaseTerm {
    #[serde(alias = "id")]
    pub doid: String,
    pub name: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub xrefs: Vec<String>,
    #[serde(default)]
    pub is_obsolete: bool,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub is_root: bool,
}

impl DiseaseTerm {
    pub fn new(doid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doid: doid.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// One QuickGO annotation row; both the camelCase API names and the
/// snake_case GAF-style names are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoAnnotation {
    #[serde(default, alias = "goId")]
    pub go_id: Option<String>,
    #[serde(default, alias = "goName")]
    pub go_name: Option<String>,
    #[serde(default, alias = "goAspect", alias = "aspect")]
    pub go_aspect: Option<String>,
    #[serde(default, alias = "geneProductId", alias = "db_object_id")]
    pub gene_product_id: Option<String>,
    #[serde(default)]
    pub qualifier: Option<String>,
    #[serde(default, alias = "evidenceCode")]
    pub evidence_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactomeSpecies {
    pub name: String,
    #[serde(rename = "taxId")]
    pub tax_id: String,
}

/// A pathway from a Reactome analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactomePathway {
    #[serde(rename = "stId")]
    pub st_id: String,
    pub name: String,
    #[serde(rename = "dbId", default)]
    pub db_id: Option<u64>,
    #[serde(default)]
    pub p_value: Option<f64>,
    #[serde(default)]
    pub fdr: Option<f64>,
    #[serde(default)]
    pub found_entities: Option<u64>,
    #[serde(default)]
    pub total_entities: Option<u64>,
    #[serde(default)]
    pub species: Option<ReactomeSpecies>,
    #[serde(rename = "inDisease", default)]
    pub in_disease: bool,
    #[serde(default)]
    pub llp: bool,
}

/// A node of Reactome's nested event hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactomeEvent {
    #[serde(rename = "stId", default)]
    pub st_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "hasDiagram", default)]
    pub has_diagram: bool,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub children: Vec<ReactomeEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeggFormat {
    #[default]
    Tabular,
    FlatFile,
}

/// Result of a KEGG REST operation (`list`, `get`, `find`, ...).
///
/// Tabular operations yield records keyed `entry_id`/`description`;
/// flat-file entries are keyed by their section names (`ENTRY`, `NAME`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeggDataset {
    pub operation: String,
    #[serde(default)]
    pub format: KeggFormat,
    #[serde(default)]
    pub records: Vec<BTreeMap<String, String>>,
}

/// One row of a KEGG `link` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeggLink {
    pub source_id: String,
    pub target_id: String,
}

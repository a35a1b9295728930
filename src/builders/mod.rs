//! Builders that assemble a [`KnowledgeGraph`](crate::graph::KnowledgeGraph)
//! from plain records fetched from biological databases.

pub mod disease;
pub mod generic;
pub mod go;
pub mod kegg;
pub mod reactome;
pub mod records;

pub use disease::{build_disease_graph, build_disease_graph_with_hierarchy, DiseaseGraphOptions};
pub use generic::{build_graph, merge_graphs};
pub use go::{build_go_graph, GoGraphOptions};
pub use kegg::{build_kegg_graph, build_kegg_link_graph, KeggGraphOptions, KeggLinkOptions};
pub use reactome::{build_reactome_graph, build_reactome_hierarchy_graph, ReactomeGraphOptions};
pub use records::{
    DiseaseTerm, GoAnnotation, KeggDataset, KeggFormat, KeggLink, ReactomeEvent, ReactomePathway,
    ReactomeSpecies,
};

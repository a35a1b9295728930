pub mod entity;
pub mod filter;
pub mod knowledge_graph;
pub mod relationship;

#[cfg(test)]
mod proptest_tests;

pub use entity::{DataSource, Node, NodeId, NodeType, Properties};
pub use filter::{EdgeFilter, NodeFilter};
pub use knowledge_graph::{GraphRecord, KnowledgeGraph};
pub use relationship::{Direction, Edge, EdgeKey, EdgeType};

// Expose modules as public for use by other crates
pub mod analysis;
pub mod builders;
pub mod error;
pub mod export;
pub mod graph;

// Re-export core types for convenience
pub use error::{GraphError, GraphResult};
pub use graph::entity;
pub use graph::knowledge_graph::KnowledgeGraph;
pub use graph::relationship;
pub use graph::{DataSource, Direction, Edge, EdgeType, Node, NodeId, NodeType};

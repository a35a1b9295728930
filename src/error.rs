use thiserror::Error;

use crate::graph::entity::NodeId;

/// Errors raised by the graph container, builders and exporters.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("Edge {from} -> {to} references missing node: {missing}")]
    MissingEndpoint {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

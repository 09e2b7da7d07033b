use std::io;
use thiserror::Error;

use crate::graph::NodeId;

/// Error type for graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node id past the end of the graph.
    #[error("Node {0} is out of range (graph has {1} nodes)")]
    NodeOutOfRange(NodeId, usize),

    /// An edge refers to a node name the graph does not contain.
    #[error("Edge refers to unknown node '{0}'")]
    UnknownNode(String),

    /// Two nodes share a name.
    #[error("Duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("Invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

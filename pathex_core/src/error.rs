use thiserror::Error;

use crate::model::{NodeId, NodeKind};

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Node {node} is a {found}, expected {expected}")]
    TypeMismatch {
        node: NodeId,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("Node '{uri}' references missing node {target}")]
    DanglingReference { uri: String, target: NodeId },

    #[error("Duplicate node URI: {0}")]
    DuplicateUri(String),

    #[error("Complex '{0}' contains itself through its components")]
    ComponentCycle(String),
}

//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::chain::HandlerId;
use crate::domain::composite::NodeId;

/// Structural violations in a composite tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositeError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("node is a leaf and cannot hold children: {0}")]
    NotAContainer(NodeId),

    #[error("adding {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("failed to render node")]
    Render(#[from] std::fmt::Error),
}

/// Structural violations in a handler chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("unknown handler: {0}")]
    UnknownHandler(HandlerId),

    #[error("linking {handler} -> {successor} would create a cycle")]
    CycleDetected {
        handler: HandlerId,
        successor: HandlerId,
    },
}

/// Domain errors represent violations of the tree or chain structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Result type for composite operations.
pub type CompositeResult<T> = Result<T, CompositeError>;

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Result type for domain operations spanning both structures.
pub type DomainResult<T> = Result<T, DomainError>;

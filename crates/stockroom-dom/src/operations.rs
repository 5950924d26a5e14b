//! DOM Node Operations
//!
//! Error type shared by tree mutation and query APIs.

use crate::{NodeId, SelectorError};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("hierarchy request error: cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation needs an element (or document) but got another node kind
    #[error("node {0} has an invalid type for this operation")]
    InvalidNodeType(NodeId),

    /// Reference node is not a child of the given parent
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Selector failed to parse
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

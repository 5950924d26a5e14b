//! Behavior errors
//!
//! Every variant describes markup that did not meet a behavior's
//! expectations. Handlers return them; dispatch logs and absorbs them.

use stockroom_dom::{DomError, NodeId};

/// Result type for behavior handlers
pub type BehaviorResult<T> = Result<T, BehaviorError>;

/// Behavior failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorError {
    /// Search input names a table id that is not in the document
    #[error("search input {input} targets missing table `{table_id}`")]
    MissingTable { input: NodeId, table_id: String },

    /// File input has no element sibling to carry the file name
    #[error("file input {0} has no label sibling")]
    MissingLabel(NodeId),

    /// A row has fewer cells than the sorted column index
    #[error("row {row} has {cells} cells, cannot sort on column {index}")]
    ColumnOutOfRange { row: NodeId, index: usize, cells: usize },

    /// Sortable header is not inside a table row
    #[error("sortable header {0} is not inside a table")]
    NotInTable(NodeId),

    /// Table has no tbody to sort
    #[error("table {0} has no tbody")]
    MissingBody(NodeId),

    #[error(transparent)]
    Dom(#[from] DomError),
}

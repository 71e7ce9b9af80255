use thiserror::Error;

/// Failures of a single search call. None of these are retryable: a search
/// either completes (found or not found) or fails with one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Extraction found no live entry. During a search this means the open-set
    /// bookkeeping is corrupt.
    #[error("extract from empty queue")]
    EmptyQueue,
    /// A node was seen twice while walking parent links.
    #[error("cycle in parent map")]
    CyclicParentMap,
    /// A parent link points at a node with no entry of its own.
    #[error("parent map links to a node it has no entry for")]
    DanglingParent,
    /// An open node had no recorded cost-so-far.
    #[error("no cost recorded for an open node")]
    MissingCost,
    /// `g + edge` or `g + h` does not fit the cost type.
    #[error("path cost overflows the cost type")]
    CostOverflow,
    #[error("invalid edge cost {cost} on {from} -> {to}")]
    InvalidCost { from: String, to: String, cost: String },
}

pub type Result<T> = std::result::Result<T, SearchError>;

use mountgraph_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelationError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unresolvable reference `{id}` (needed by `{context}`)")]
    UnresolvedReference { id: String, context: String },

    /// Path diffing only makes sense for an ambiguous group.
    #[error("path diff needs at least two paths, got {count}")]
    DegeneratePathDiff { count: usize },

    #[error("single-property wrapper cycle: {}", .chain.join(" -> "))]
    WrapperCycle { chain: Vec<String> },
}

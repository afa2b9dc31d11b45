use thiserror::Error;

/// Data-integrity faults raised while normalizing definitions.
///
/// None of these are recoverable: the generation run stops at the first one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unresolvable reference `{id}` (needed by `{context}`)")]
    UnresolvedReference { id: String, context: String },

    #[error("unsupported primitive kind `{kind}` on property `{property}` of `{definition}`")]
    UnsupportedPrimitive {
        definition: String,
        property: String,
        kind: String,
    },

    #[error("invalid definition `{id}`: {message}")]
    InvalidDefinition { id: String, message: String },
}

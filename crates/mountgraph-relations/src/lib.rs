//! Mountgraph relationship inference
//!
//! For every normalized spec, treated as a candidate *parent*, find every
//! other spec that can be constructed independently and spliced into it
//! ("mounted"), at which dotted path, and whether list-valued. When the same
//! child is reachable through several paths of one parent, each mount gets a
//! short alias and at most one is flagged as the default.
//!
//! Entry point: [`generate`], a pure function from definitions plus
//! [`ModelConfig`](mountgraph_schema::ModelConfig) to specs plus
//! [`ContextRelations`].

pub mod disambiguate;
pub mod discovery;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod relations;

pub use discovery::{discover, is_all_simple, Discovery, MountCandidate};
pub use error::RelationError;
pub use pipeline::{generate, infer_relations, relax_required, GenerationStats, Generated};
pub use relations::{Alias, ContextRelation, ContextRelations};

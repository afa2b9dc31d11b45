//! Mountgraph schema model
//!
//! Turns raw, OpenAPI-style type definitions (Kubernetes' `definitions` map is
//! the reference corpus) into normalized [`Spec`]s:
//!
//! - server-managed and read-only properties are stripped,
//! - an embedded object-metadata block is detected and extracted,
//! - group/version/kind identity is recorded and checked against an allow-set,
//! - well-known leaf types are replaced by external type descriptors,
//! - single-property wrapper specs are collapsed onto the spec they wrap.
//!
//! The crate performs no I/O. Callers hand in already-parsed definitions and a
//! [`ModelConfig`], and get a [`SpecMap`] back.

pub mod config;
pub mod definition;
pub mod error;
pub mod normalize;
pub mod patch;
pub mod spec;

pub use config::{KindSet, ModelConfig};
pub use definition::{Definition, Definitions, GroupVersionKind, PropertyShape};
pub use error::SchemaError;
pub use normalize::{collapse_wrappers, normalize, Normalizer};
pub use patch::{ExternalType, PatchTable};
pub use spec::{Primitive, PropertySpec, PropertyType, Spec, SpecMap};

//! Definition → Spec normalization.
//!
//! Two passes:
//!
//! 1. [`Normalizer::normalize_definition`] turns each definition into a spec
//!    whose `properties` are the *raw* (pre-collapse) property list.
//! 2. [`collapse_wrappers`] needs every raw spec at once: a spec whose only
//!    property is a reference takes over the referenced spec's raw
//!    properties and remembers the elided property name as `spec_key`.
//!
//! The collapse is applied exactly once per spec. Deeper unwinding is a
//! path-aware concern of relationship inference.

use crate::config::ModelConfig;
use crate::definition::{Definition, Definitions, PropertyShape};
use crate::error::SchemaError;
use crate::spec::{Primitive, PropertySpec, PropertyType, Spec, SpecMap};
use regex::Regex;
use std::sync::OnceLock;

fn read_only_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)read-?only").expect("static read-only pattern"))
}

/// `#/definitions/io.k8s.api.core.v1.Pod` → `io.k8s.api.core.v1.Pod`.
pub fn bare_id(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

pub struct Normalizer<'a> {
    config: &'a ModelConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    /// First pass for a single definition. `properties` on the returned spec
    /// is the raw list; `spec_key` is never set here.
    pub fn normalize_definition(&self, id: &str, def: &Definition) -> Result<Spec, SchemaError> {
        let (module, name) = id.rsplit_once('.').ok_or_else(|| SchemaError::InvalidDefinition {
            id: id.to_string(),
            message: "id has no namespace separator".to_string(),
        })?;

        let mut properties = Vec::with_capacity(def.properties.len());
        for (prop_name, shape) in &def.properties {
            if let Some(property) = self.normalize_property(id, def, prop_name, shape)? {
                properties.push(property);
            }
        }

        let meta_position = properties
            .iter()
            .position(|p| p.reference() == Some(self.config.object_meta_id.as_str()));
        let has_meta = match meta_position {
            Some(index) => {
                properties.remove(index);
                true
            }
            None => false,
        };

        let gvk = def.gvk().cloned();
        let has_kind = gvk
            .as_ref()
            .is_some_and(|gvk| self.config.kinds.contains(gvk));

        tracing::debug!(
            id,
            properties = properties.len(),
            has_meta,
            has_kind,
            "normalized definition"
        );

        Ok(Spec {
            id: id.to_string(),
            name: name.to_string(),
            module: module.to_string(),
            description: def.description.clone(),
            has_meta,
            has_kind,
            properties,
            spec_key: None,
            gvk,
        })
    }

    fn normalize_property(
        &self,
        id: &str,
        def: &Definition,
        name: &str,
        shape: &PropertyShape,
    ) -> Result<Option<PropertySpec>, SchemaError> {
        if self.config.is_excluded(name) || read_only_marker().is_match(&shape.description) {
            return Ok(None);
        }

        let (effective, is_array) = if shape.is_array() {
            let items = shape
                .items
                .as_deref()
                .ok_or_else(|| SchemaError::InvalidDefinition {
                    id: id.to_string(),
                    message: format!("array property `{name}` has no `items`"),
                })?;
            (items, true)
        } else {
            (shape, false)
        };

        let ty = match &effective.reference {
            Some(reference) => {
                let target = bare_id(reference);
                match self.config.patches.get(target) {
                    Some(external) => PropertyType::Patched(external.clone()),
                    None => PropertyType::Reference(target.to_string()),
                }
            }
            None => {
                let kind = effective.kind.as_deref().unwrap_or("<none>");
                let primitive = Primitive::from_schema_kind(kind).ok_or_else(|| {
                    SchemaError::UnsupportedPrimitive {
                        definition: id.to_string(),
                        property: name.to_string(),
                        kind: kind.to_string(),
                    }
                })?;
                PropertyType::Primitive(primitive)
            }
        };

        Ok(Some(PropertySpec {
            name: name.to_string(),
            ty,
            is_required: def.is_required(name),
            is_array,
            description: shape.description.clone(),
        }))
    }

    /// Runs both passes over the complete definition set.
    pub fn normalize_all(&self, definitions: &Definitions) -> Result<SpecMap, SchemaError> {
        let mut raw = SpecMap::new();
        for (id, def) in definitions {
            raw.insert(id.clone(), self.normalize_definition(id, def)?);
        }
        collapse_wrappers(&raw)
    }
}

/// Second pass: collapse single-reference wrapper specs.
///
/// `raw` must hold first-pass specs (raw property lists). The substituted
/// properties are always the wrapped spec's *raw* list.
pub fn collapse_wrappers(raw: &SpecMap) -> Result<SpecMap, SchemaError> {
    let mut collapsed = SpecMap::new();
    for (id, spec) in raw {
        let mut spec = spec.clone();

        let wrapped = match spec.properties.as_slice() {
            [only] => only
                .reference()
                .map(|target| (only.name.clone(), target.to_string())),
            _ => None,
        };

        if let Some((key, target)) = wrapped {
            let inner = raw
                .get(&target)
                .ok_or_else(|| SchemaError::UnresolvedReference {
                    id: target.clone(),
                    context: id.clone(),
                })?;
            tracing::debug!(id = %id, spec_key = %key, wrapped = %target, "collapsed wrapper spec");
            spec.properties = inner.properties.clone();
            spec.spec_key = Some(key);
        }

        collapsed.insert(id.clone(), spec);
    }
    Ok(collapsed)
}

/// Convenience entry point: both normalization passes with `config`.
pub fn normalize(definitions: &Definitions, config: &ModelConfig) -> Result<SpecMap, SchemaError> {
    Normalizer::new(config).normalize_all(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_takes_last_segment() {
        assert_eq!(bare_id("#/definitions/io.k8s.api.core.v1.Pod"), "io.k8s.api.core.v1.Pod");
        assert_eq!(bare_id("io.k8s.api.core.v1.Pod"), "io.k8s.api.core.v1.Pod");
    }

    #[test]
    fn test_read_only_marker_variants() {
        let marker = read_only_marker();
        assert!(marker.is_match("Populated by the system. Read-only."));
        assert!(marker.is_match("READONLY field"));
        assert!(marker.is_match("Mounted read-only if true"));
        assert!(!marker.is_match("Name must be unique. Cannot be updated."));
    }
}

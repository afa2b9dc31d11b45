//! Mount-point discovery for one parent spec.
//!
//! Walks the parent's properties and decides, per referenced spec, whether it
//! is substantial enough to be its own mountable component or a thin
//! single-property wrapper that should be seen through:
//!
//! - array of references, or a referenced spec with more than one property
//!   and at least one reference of its own → mount candidate, stop there;
//! - referenced spec with exactly one property → descend into it, extending
//!   the dotted path;
//! - anything else → not a candidate.
//!
//! Descent is guarded by the chain of spec ids already entered on the current
//! branch; re-entering one is reported as [`RelationError::WrapperCycle`].

use crate::error::RelationError;
use mountgraph_schema::{PropertySpec, Spec, SpecMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountCandidate {
    pub id: String,
    /// Dotted path relative to the parent, prefixed by its `spec_key`.
    pub path: String,
    pub is_array: bool,
}

/// True when none of `spec`'s properties reference a known spec.
pub fn is_all_simple(spec: &Spec, specs: &SpecMap) -> bool {
    spec.properties
        .iter()
        .all(|p| p.reference().map_or(true, |id| !specs.contains_key(id)))
}

struct Frame<'a> {
    properties: &'a [PropertySpec],
    next: usize,
    prefix: String,
    chain: Vec<&'a str>,
}

/// Lazy, depth-first sequence of mount candidates under one parent.
///
/// Yields at most one `Err`, after which it is exhausted.
pub struct Discovery<'a> {
    specs: &'a SpecMap,
    stack: Vec<Frame<'a>>,
    failed: bool,
}

pub fn discover<'a>(parent: &'a Spec, specs: &'a SpecMap) -> Discovery<'a> {
    let prefix = parent
        .spec_key
        .as_ref()
        .map(|key| format!("{key}."))
        .unwrap_or_default();
    Discovery {
        specs,
        stack: vec![Frame {
            properties: &parent.properties,
            next: 0,
            prefix,
            chain: vec![parent.id.as_str()],
        }],
        failed: false,
    }
}

impl<'a> Iterator for Discovery<'a> {
    type Item = Result<MountCandidate, RelationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let specs = self.specs;

        loop {
            let frame = self.stack.last_mut()?;
            let properties = frame.properties;
            let Some(property) = properties.get(frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            let Some(child) = property.reference().and_then(|id| specs.get(id)) else {
                continue;
            };
            let path = format!("{}{}", frame.prefix, property.name);

            if property.is_array || (!is_all_simple(child, specs) && child.properties.len() > 1) {
                tracing::trace!(child = %child.id, path = %path, is_array = property.is_array, "mount candidate");
                return Some(Ok(MountCandidate {
                    id: child.id.clone(),
                    path,
                    is_array: property.is_array,
                }));
            }

            if child.properties.len() != 1 {
                continue;
            }

            if frame.chain.contains(&child.id.as_str()) {
                self.failed = true;
                let mut chain: Vec<String> = frame.chain.iter().map(|id| id.to_string()).collect();
                chain.push(child.id.clone());
                return Some(Err(RelationError::WrapperCycle { chain }));
            }

            let mut chain = frame.chain.clone();
            chain.push(child.id.as_str());
            self.stack.push(Frame {
                properties: &child.properties,
                next: 0,
                prefix: format!("{path}."),
                chain,
            });
        }
    }
}

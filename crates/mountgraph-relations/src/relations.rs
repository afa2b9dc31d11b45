//! Context relations and their two-sided index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    #[serde(rename = "default")]
    pub is_default: bool,
}

impl Alias {
    pub fn new(name: &str, is_default: bool) -> Self {
        Self {
            name: name.to_string(),
            is_default,
        }
    }
}

/// "Child `id` can be mounted under `parent_id` at `path`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextRelation {
    pub id: String,
    pub parent_id: String,
    pub path: String,
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<Alias>,
}

impl ContextRelation {
    /// Straight relations and default-flagged aliases.
    pub fn is_default(&self) -> bool {
        self.alias.as_ref().map_or(true, |alias| alias.is_default)
    }
}

/// Relations indexed by child id and by parent id. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextRelations {
    by_child: BTreeMap<String, Vec<ContextRelation>>,
    by_parent: BTreeMap<String, Vec<ContextRelation>>,
}

impl ContextRelations {
    pub fn from_relations(relations: impl IntoIterator<Item = ContextRelation>) -> Self {
        let mut index = Self::default();
        for relation in relations {
            index.insert(relation);
        }
        index
    }

    pub(crate) fn insert(&mut self, relation: ContextRelation) {
        self.by_parent
            .entry(relation.parent_id.clone())
            .or_default()
            .push(relation.clone());
        self.by_child
            .entry(relation.id.clone())
            .or_default()
            .push(relation);
    }

    /// Every place `child_id` can be mounted.
    pub fn for_child(&self, child_id: &str) -> &[ContextRelation] {
        self.by_child.get(child_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every mount point inside `parent_id`.
    pub fn for_parent(&self, parent_id: &str) -> &[ContextRelation] {
        self.by_parent.get(parent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The unflagged mount of `child_id` under `parent_id`, if there is one.
    pub fn default_for(&self, child_id: &str, parent_id: &str) -> Option<&ContextRelation> {
        self.for_child(child_id)
            .iter()
            .find(|r| r.parent_id == parent_id && r.is_default())
    }

    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.by_child.keys().map(String::as_str)
    }

    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.by_parent.keys().map(String::as_str)
    }

    /// All relations, grouped by parent id.
    pub fn iter(&self) -> impl Iterator<Item = &ContextRelation> {
        self.by_parent.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_parent.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }
}

use crate::definition::GroupVersionKind;
use crate::patch::{deserialize_over_defaults, PatchTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const OBJECT_META_ID: &str = "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta";
pub const LIST_META_ID: &str = "io.k8s.apimachinery.pkg.apis.meta.v1.ListMeta";
pub const EXCLUDED_PROPERTIES: &[&str] = &["kind", "apiVersion", "managedFields", "status"];

/// Caller-chosen set of genuine top-level resources, keyed
/// `<group>.<version>.<kind>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindSet {
    keys: BTreeSet<String>,
}

impl KindSet {
    pub fn contains(&self, gvk: &GroupVersionKind) -> bool {
        self.keys.contains(&gvk.key())
    }

    pub fn insert(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    /// One key per line; blank lines and `#` comments are skipped.
    pub fn parse_list(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl FromIterator<String> for KindSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a GroupVersionKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = &'a GroupVersionKind>>(iter: I) -> Self {
        iter.into_iter().map(GroupVersionKind::key).collect()
    }
}

/// Everything the normalizer needs besides the definitions themselves.
///
/// `Default` is the Kubernetes convention set with an empty kind allow-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ModelConfig {
    pub kinds: KindSet,
    #[serde(deserialize_with = "deserialize_over_defaults")]
    pub patches: PatchTable,
    pub object_meta_id: String,
    pub list_meta_id: String,
    pub excluded_properties: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kinds: KindSet::default(),
            patches: PatchTable::kubernetes(),
            object_meta_id: OBJECT_META_ID.to_string(),
            list_meta_id: LIST_META_ID.to_string(),
            excluded_properties: EXCLUDED_PROPERTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ModelConfig {
    pub fn with_kinds(mut self, kinds: KindSet) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn is_excluded(&self, property: &str) -> bool {
        self.excluded_properties.iter().any(|p| p == property)
    }
}

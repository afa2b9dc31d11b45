//! Well-known leaf types that never become mountable specs.
//!
//! A reference whose bare id appears in the [`PatchTable`] is rewritten to a
//! [`PropertyType::Patched`](crate::PropertyType::Patched) carrying the
//! external type descriptor instead of a reference to another spec.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExternalType {
    pub name: String,
}

impl ExternalType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchTable {
    entries: BTreeMap<String, ExternalType>,
}

const KUBERNETES_PATCHES: &[(&str, &str)] = &[
    ("io.k8s.apimachinery.pkg.apis.meta.v1.Time", "Time"),
    ("io.k8s.apimachinery.pkg.apis.meta.v1.MicroTime", "MicroTime"),
    ("io.k8s.apimachinery.pkg.apis.meta.v1.Duration", "Duration"),
    ("io.k8s.apimachinery.pkg.api.resource.Quantity", "Quantity"),
    ("io.k8s.apimachinery.pkg.util.intstr.IntOrString", "IntOrString"),
    ("io.k8s.apimachinery.pkg.runtime.RawExtension", "RawExtension"),
    (
        "io.k8s.apiextensions-apiserver.pkg.apis.apiextensions.v1.JSON",
        "JSON",
    ),
    (
        "io.k8s.apiextensions-apiserver.pkg.apis.apiextensions.v1beta1.JSON",
        "JSON",
    ),
];

impl PatchTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn kubernetes() -> Self {
        KUBERNETES_PATCHES
            .iter()
            .map(|(id, name)| (id.to_string(), ExternalType::new(name)))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&ExternalType> {
        self.entries.get(id)
    }

    pub fn insert(&mut self, id: &str, external: ExternalType) -> Option<ExternalType> {
        self.entries.insert(id.to_string(), external)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExternalType)> {
        self.entries.iter().map(|(id, ext)| (id.as_str(), ext))
    }
}

impl Default for PatchTable {
    fn default() -> Self {
        Self::kubernetes()
    }
}

impl FromIterator<(String, ExternalType)> for PatchTable {
    fn from_iter<I: IntoIterator<Item = (String, ExternalType)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, ExternalType)> for PatchTable {
    fn extend<I: IntoIterator<Item = (String, ExternalType)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Config-file entries are layered over the built-in Kubernetes table.
pub(crate) fn deserialize_over_defaults<'de, D>(deserializer: D) -> Result<PatchTable, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, ExternalType>::deserialize(deserializer)?;
    let mut table = PatchTable::kubernetes();
    table.extend(overrides);
    Ok(table)
}

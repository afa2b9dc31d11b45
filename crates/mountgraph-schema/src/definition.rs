//! Raw input definitions, as found under `definitions` in an OpenAPI v2
//! document.
//!
//! Only the handful of keys the normalizer reads are modeled; everything else
//! in the source document is ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Definition id (`<namespace>.<version>.<TypeName>`) → raw definition.
pub type Definitions = BTreeMap<String, Definition>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyShape>,
    #[serde(default)]
    pub required: Vec<String>,
    /// Kubernetes encodes this as a list; the first entry is authoritative.
    #[serde(
        rename = "x-kubernetes-group-version-kind",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub group_version_kinds: Vec<GroupVersionKind>,
}

impl Definition {
    pub fn gvk(&self) -> Option<&GroupVersionKind> {
        self.group_version_kinds.first()
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

/// Declared shape of one property (or of an array's `items`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyShape {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertyShape>>,
    #[serde(default)]
    pub description: String,
}

impl PropertyShape {
    pub fn primitive(kind: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            ..Self::default()
        }
    }

    pub fn reference(id: &str) -> Self {
        Self {
            reference: Some(format!("#/definitions/{id}")),
            ..Self::default()
        }
    }

    pub fn array_of(items: PropertyShape) -> Self {
        Self {
            kind: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn is_array(&self) -> bool {
        self.kind.as_deref() == Some("array")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
    /// Empty for the Kubernetes core group.
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Allow-set key: `<group>.<version>.<kind>`, group kept verbatim.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.group, self.version, self.kind)
    }
}

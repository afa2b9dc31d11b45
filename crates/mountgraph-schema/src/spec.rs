//! Normalized spec model.

use crate::definition::GroupVersionKind;
use crate::patch::ExternalType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spec id → normalized spec. Ordered so every artifact derived from it is
/// deterministic.
pub type SpecMap = BTreeMap<String, Spec>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Boolean,
    Number,
    /// Schema `integer`; emitters render it with a 64-bit-safe numeric type.
    Integer,
    /// Schema `object` without a reference: an open, string-keyed map.
    Map,
}

impl Primitive {
    /// Maps a schema `type` keyword onto the primitive vocabulary.
    pub fn from_schema_kind(kind: &str) -> Option<Self> {
        match kind {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "object" => Some(Self::Map),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Map => "map",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyType {
    Primitive(Primitive),
    /// Bare id of another definition.
    Reference(String),
    Patched(ExternalType),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    pub is_required: bool,
    pub is_array: bool,
    pub description: String,
}

impl PropertySpec {
    pub fn new(name: &str, ty: PropertyType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_required: false,
            is_array: false,
            description: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Referenced spec id, if this property is a reference.
    pub fn reference(&self) -> Option<&str> {
        match &self.ty {
            PropertyType::Reference(id) => Some(id.as_str()),
            PropertyType::Primitive(_) | PropertyType::Patched(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub id: String,
    pub name: String,
    pub module: String,
    pub description: String,
    pub has_meta: bool,
    pub has_kind: bool,
    pub properties: Vec<PropertySpec>,
    /// Name of the property elided when this spec was collapsed onto the
    /// single spec it wrapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gvk: Option<GroupVersionKind>,
}

impl Spec {
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertySpec> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    /// True if any property references `id` (directly or as array items).
    pub fn references(&self, id: &str) -> bool {
        self.properties.iter().any(|p| p.reference() == Some(id))
    }

    /// Required property names, in property order.
    pub fn required_properties(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| p.is_required)
            .map(|p| p.name.as_str())
    }
}

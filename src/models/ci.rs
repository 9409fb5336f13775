use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::wire;

/// Attribute name to value. Values are strings on the wire even when they
/// represent booleans or numbers.
pub type Attributes = BTreeMap<String, String>;

/// CI-level metadata such as `ciName`, `comments` and `rfcAction`.
pub type Properties = BTreeMap<String, String>;

/// A configuration item as last reported by the service.
///
/// Missing `ciAttributes` or `ciAttrProps.owner` decode to empty maps. A
/// snapshot without a `ciId` describes something the service does not hold
/// (a template, or an empty lookup result).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CiSnapshot {
    pub ci_id: Option<String>,
    pub ci_name: Option<String>,
    pub attributes: Attributes,
    pub owner_props: Attributes,
    /// The full decoded body, for fields not modelled above.
    #[serde(skip)]
    pub raw: Value,
}

impl CiSnapshot {
    pub fn from_value(raw: Value) -> Self {
        Self {
            ci_id: wire::lookup(&raw, "ciId").and_then(wire::scalar_string),
            ci_name: wire::lookup(&raw, "ciName").and_then(wire::scalar_string),
            attributes: wire::string_map(wire::lookup(&raw, "ciAttributes")),
            owner_props: wire::string_map(wire::lookup(&raw, "ciAttrProps.owner")),
            raw,
        }
    }

    /// Decode a list body. A body that is not an array yields no items.
    pub fn list_from_value(raw: Value) -> Vec<Self> {
        match raw {
            Value::Array(items) => items.into_iter().map(Self::from_value).collect(),
            _ => Vec::new(),
        }
    }

    /// Dotted lookup into the raw body, e.g. `ciAttrProps.owner`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        wire::lookup(&self.raw, path)
    }

    pub fn exists(&self) -> bool {
        self.ci_id.is_some()
    }
}

/// The payload submitted for a create or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CiRecord {
    pub attributes: Attributes,
    /// `None` leaves ownership untouched on the server.
    pub owner_props: Option<Attributes>,
    pub properties: Properties,
    /// Set when the CI is instantiated from a named template.
    pub template_name: Option<String>,
}

/// Pack coordinates a platform is instantiated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPack {
    pub name: String,
    pub version: String,
    pub source: String,
}

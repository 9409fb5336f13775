//! JSON encoding of CI records and tolerant decoding of response bodies.
//!
//! Decoding never fails: a missing key, a `null`, or a body that is not JSON
//! all read as "absent".

use serde_json::{Map, Value};

use crate::models::{Attributes, CiRecord};

/// Type tag wrapping every submitted configuration item.
pub const CI_TYPE_TAG: &str = "cms_dj_ci";

/// Encode a record as `{"cms_dj_ci": {...}, "template_name": ...}`.
///
/// Properties are flattened into the CI object next to `ciAttributes` and
/// `ciAttrProps.owner`.
pub fn encode_ci(record: &CiRecord) -> Value {
    let mut ci = Map::new();
    for (key, value) in &record.properties {
        ci.insert(key.clone(), Value::String(value.clone()));
    }
    ci.insert("ciAttributes".to_string(), string_map_value(&record.attributes));
    if let Some(owner) = &record.owner_props {
        ci.insert(
            "ciAttrProps".to_string(),
            serde_json::json!({ "owner": string_map_value(owner) }),
        );
    }

    let mut body = Map::new();
    body.insert(CI_TYPE_TAG.to_string(), Value::Object(ci));
    if let Some(template) = &record.template_name {
        body.insert("template_name".to_string(), Value::String(template.clone()));
    }
    Value::Object(body)
}

/// Parse a response body, treating anything that is not JSON as `null`.
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or(Value::Null)
}

/// Dotted lookup such as `ciAttrProps.owner`. `null` counts as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.as_object()?.get(key))
        .filter(|v| !v.is_null())
}

/// Render a scalar as the string the service would store.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Read an object as a string map. Anything else reads as empty.
pub fn string_map(value: Option<&Value>) -> Attributes {
    value
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), scalar_string(v).unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default()
}

fn string_map_value(map: &Attributes) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

//! Options merge logic
//!
//! Implements the layered merge with:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

use serde_json::{Map, Value};

use super::ConfigError;

/// Deep merge two JSON values.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive)
/// - Arrays: REPLACE (second wins entirely)
/// - Scalars: override (second wins)
/// - Null: override (clears an optional option)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // Arrays replace; `--ios_multi_cpus` style lists never concatenate.
        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

/// Parse one `fragment.field=value` override into a nested object.
///
/// The value is read as a TOML literal (`true`, `["arm64", "armv7"]`,
/// `"quoted"`); anything that is not a TOML literal is taken as a bare
/// string. An empty value becomes `null`, which unsets optional options.
pub fn parse_override(raw: &str) -> Result<Value, ConfigError> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(format!("missing '=' in '{}'", raw)))?;

    let keys: Vec<&str> = path.trim().split('.').collect();
    if keys.len() < 2 || keys.iter().any(|k| k.is_empty()) {
        return Err(ConfigError::InvalidOverride(format!(
            "expected fragment.field, got '{}'",
            path
        )));
    }

    let mut nested = parse_literal(value.trim());
    for key in keys.iter().rev() {
        let mut map = Map::new();
        map.insert(key.to_string(), nested);
        nested = Value::Object(map);
    }
    Ok(nested)
}

/// Parse and merge a list of overrides into a single layer.
pub fn parse_overrides<S: AsRef<str>>(raw: &[S]) -> Result<Value, ConfigError> {
    raw.iter().try_fold(Value::Object(Map::new()), |layer, item| {
        Ok(deep_merge(layer, parse_override(item.as_ref())?))
    })
}

fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    match toml::from_str::<toml::Table>(&format!("value = {}", raw)) {
        Ok(mut table) => table
            .remove("value")
            .map(toml_to_json)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        Err(_) => Value::String(raw.to_string()),
    }
}

/// Convert TOML Value to JSON Value
pub(crate) fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

//! Layer merging for lane config.
//!
//! Tables merge key by key. Lists and scalars from a later layer replace
//! the earlier value outright, so a repo `extra_conf_files` hides the host
//! one; fragment lists only concatenate inside the assembler.

use serde_json::Value;

/// Overlay `upper` onto `lower`.
///
/// Only two objects merge recursively; any other pairing (lists, strings,
/// booleans, `null`) resolves to `upper`.
pub fn deep_merge(lower: Value, upper: Value) -> Value {
    let (mut table, upper_table) = match (lower, upper) {
        (Value::Object(lower), Value::Object(upper)) => (lower, upper),
        (_, upper) => return upper,
    };

    for (key, value) in upper_table {
        let value = match table.remove(&key) {
            Some(existing) => deep_merge(existing, value),
            None => value,
        };
        table.insert(key, value);
    }
    Value::Object(table)
}

/// Fold layers lowest precedence first.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

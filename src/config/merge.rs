//! Field-by-field merging of configuration layers.
//!
//! Layers are parsed into `serde_json::Value` so a file that sets one key
//! does not reset its siblings.

use serde_json::Value;

/// Merge `overlay` into `base` in place.
///
/// Objects merge key by key; any other overlay value replaces the base value.
/// A null overlay leaves the base untouched.
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Merge layers in order; later layers win.
pub fn merge_layers(layers: impl IntoIterator<Item = Value>) -> Value {
    let mut merged = Value::Null;
    for layer in layers {
        merge_into(&mut merged, layer);
    }
    merged
}

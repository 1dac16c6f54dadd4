//! Post-projection string replacement.
//!
//! After all fields of a resource are rendered, one recursive pass applies
//! the configured literal replacements to every string leaf of the attribute
//! tree, nested arrays and objects included.

use serde_json::Value;

use crate::settings::Replacement;

/// Applies the ordered replacement list to every string leaf of `value`.
pub(crate) fn apply(value: &mut Value, replacements: &[Replacement]) {
    if replacements.is_empty() {
        return;
    }
    match value {
        Value::String(s) => {
            for replacement in replacements {
                *s = s.replace(&replacement.from, &replacement.to);
            }
        }
        Value::Array(items) => {
            for item in items {
                apply(item, replacements);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                apply(item, replacements);
            }
        }
        _ => {}
    }
}

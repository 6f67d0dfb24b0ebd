//! Recursive record merge used by partial updates

use serde_json::Value;

use crate::record::Record;

/// Merge `patch` into `base`
///
/// - Every leaf the patch defines wins
/// - Object-valued fields present on both sides merge field by field
/// - Scalars and arrays are replaced wholesale
/// - Fields the patch does not mention keep their original value
pub fn merge_recursive(mut base: Record, patch: Record) -> Record {
    for (key, incoming) in patch {
        match incoming {
            Value::Object(incoming) => match base.get_mut(&key) {
                Some(Value::Object(existing)) => {
                    let merged = merge_recursive(std::mem::take(existing), incoming);
                    *existing = merged;
                }
                _ => {
                    base.insert(key, Value::Object(incoming));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }

    base
}

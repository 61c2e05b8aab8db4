//! Path resolution with default-on-missing semantics.

use crate::schema::{FieldPath, Segment};
use serde_json::Value;

/// Walks `path` from `root`.
///
/// Returns `None` as soon as a key is absent, an index is out of range, a step
/// meets the wrong JSON type, or the final value is `null`.
pub fn lookup<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;

    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Index(idx), Value::Array(items)) => items.get(*idx)?,
            _ => return None,
        };
    }

    match current {
        Value::Null => None,
        value => Some(value),
    }
}

/// Value at `path`, or a copy of `default` when the path cannot be resolved.
pub fn resolve(root: &Value, path: &FieldPath, default: &Value) -> Value {
    lookup(root, path).cloned().unwrap_or_else(|| default.clone())
}

//! Safe dotted-path lookup over JSON values

use serde_json::Value;

/// Walk `value` along a dotted path (`"body.user.id"`), returning `None` as
/// soon as any segment is missing instead of failing.
///
/// Object segments index by key; numeric segments also index into arrays.
/// An empty path returns the value itself.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walks_nested_objects() {
        let value = json!({"body": {"user": {"id": 1}}});
        assert_eq!(extract_path(&value, "body.user.id"), Some(&json!(1)));
    }

    #[test]
    fn missing_intermediate_segment_is_none_not_panic() {
        let value = json!({"body": {}});
        assert_eq!(extract_path(&value, "body.missing.x"), None);
    }

    #[test]
    fn indexes_into_arrays() {
        let value = json!({"items": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(extract_path(&value, "items.1.id"), Some(&json!("b")));
        assert_eq!(extract_path(&value, "items.5.id"), None);
    }

    #[test]
    fn scalar_midway_is_none() {
        let value = json!({"a": 42});
        assert_eq!(extract_path(&value, "a.b"), None);
    }

    #[test]
    fn empty_path_returns_root() {
        let value = json!({"a": 1});
        assert_eq!(extract_path(&value, ""), Some(&value));
    }
}

//! Freezing: turning mutable JSON into a [`Value`] nothing can change.

use serde_json::Value as Json;

use crate::value::Value;

/// Conversion into a frozen [`Value`].
///
/// Freezing an already frozen value hands it back untouched, so freezing is
/// idempotent and a committed value keeps its identity.
pub trait Freeze {
    fn freeze(self) -> Value;
}

impl Freeze for Value {
    fn freeze(self) -> Value {
        self
    }
}

impl Freeze for &Value {
    fn freeze(self) -> Value {
        self.clone()
    }
}

impl Freeze for Json {
    fn freeze(self) -> Value {
        Value::from(self)
    }
}

impl Freeze for &Json {
    fn freeze(self) -> Value {
        Value::from(self)
    }
}

/// Deep-freeze the given value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xmodel_deep::{freeze, thaw};
///
/// let mut draft = json!({"list": [1, 2]});
/// let frozen = freeze(draft.clone());
///
/// // Editing the draft afterwards has no effect on the frozen value.
/// draft["list"][0] = json!(100);
/// assert_eq!(thaw(&frozen), json!({"list": [1, 2]}));
///
/// // Freezing twice is a no-op.
/// assert!(freeze(frozen.clone()).same(&frozen));
/// ```
pub fn freeze<T: Freeze>(value: T) -> Value {
    value.freeze()
}

/// A mutable copy of a frozen value, detached from it.
pub fn thaw(value: &Value) -> Json {
    Json::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_freeze_json() {
        let frozen = freeze(json!({"a": [1, {"b": null}]}));
        assert_eq!(frozen, json!({"a": [1, {"b": null}]}));
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let frozen = freeze(json!([1, 2, 3]));
        let again = freeze(&frozen);
        assert!(again.same(&frozen));
    }

    #[test]
    fn test_thaw_is_detached() {
        let frozen = freeze(json!({"a": {"b": 1}}));
        let mut thawed = thaw(&frozen);
        thawed["a"]["b"] = json!(2);
        assert_eq!(frozen, json!({"a": {"b": 1}}));
        assert_eq!(thawed, json!({"a": {"b": 2}}));
    }
}

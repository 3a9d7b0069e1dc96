use std::rc::Rc;

use crate::value::Value;

/// Creates a deep clone of any value.
///
/// Every nested array and object gets a fresh allocation, so the result is
/// equal to the input but shares no container with it. Scalars pass through.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xmodel_deep::{clone, Value};
///
/// let original = Value::from(json!({"foo": [1, 2, 3]}));
/// let cloned = clone(&original);
///
/// assert_eq!(original, cloned);
/// assert!(!original.same(&cloned));
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Array(arr) => Value::Array(Rc::new(arr.iter().map(clone).collect())),
        Value::Object(obj) => Value::Object(Rc::new(
            obj.iter().map(|(key, val)| (key.clone(), clone(val))).collect(),
        )),
        scalar => scalar.clone(),
    }
}

/// Copies only the top-level container; children are shared with the input.
pub fn clone_shallow(value: &Value) -> Value {
    match value {
        Value::Array(arr) => Value::Array(Rc::new(arr.as_ref().clone())),
        Value::Object(obj) => Value::Object(Rc::new(obj.as_ref().clone())),
        scalar => scalar.clone(),
    }
}

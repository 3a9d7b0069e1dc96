use serde_json::Number;

use crate::value::Value;

/// Performs a deep equality check between two values.
///
/// Identical values short-circuit; otherwise arrays compare element by
/// element and objects key by key, ignoring field order. Numbers compare by
/// numeric value, so `1` equals `1.0`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xmodel_deep::{equal, Value};
///
/// let a = Value::from(json!({"foo": [1, 2, 3]}));
/// let b = Value::from(json!({"foo": [1, 2, 3]}));
/// let c = Value::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(equal(&a, &b));
/// assert!(!equal(&a, &c));
/// ```
pub fn equal(a: &Value, b: &Value) -> bool {
    if a.same(b) {
        return true;
    }
    match (a, b) {
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a.iter().zip(arr_b.iter()).all(|(x, y)| equal(x, y))
        }
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a.iter() {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !equal(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }
        // Scalars were settled by `same`.
        _ => false,
    }
}

pub(crate) fn number_eq(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_equal_primitives() {
        assert!(equal(&v(json!(null)), &v(json!(null))));
        assert!(equal(&v(json!(true)), &v(json!(true))));
        assert!(!equal(&v(json!(true)), &v(json!(false))));
        assert!(equal(&v(json!(42)), &v(json!(42.0))));
        assert!(!equal(&v(json!("a")), &v(json!("b"))));
        assert!(!equal(&v(json!(0)), &v(json!(null))));
    }

    #[test]
    fn test_equal_arrays() {
        assert!(equal(&v(json!([1, 2, 3])), &v(json!([1, 2, 3]))));
        assert!(!equal(&v(json!([1, 2, 3])), &v(json!([1, 2]))));
        assert!(!equal(&v(json!([1, 2, 3])), &v(json!([3, 2, 1]))));
    }

    #[test]
    fn test_equal_objects() {
        assert!(equal(&v(json!({"a": 1, "b": 2})), &v(json!({"b": 2, "a": 1}))));
        assert!(!equal(&v(json!({"a": 1})), &v(json!({"a": 1, "b": 2}))));
        assert!(!equal(&v(json!({"a": 1})), &v(json!({"b": 1}))));
    }

    #[test]
    fn test_array_and_object_differ() {
        assert!(!equal(&v(json!([])), &v(json!({}))));
        assert!(!equal(&v(json!({"0": 1})), &v(json!([1]))));
    }

    #[test]
    fn test_equal_nested() {
        let a = v(json!({"a": [{"b": {"c": [1, {"d": null}]}}]}));
        let b = v(json!({"a": [{"b": {"c": [1, {"d": null}]}}]}));
        let c = v(json!({"a": [{"b": {"c": [1, {"d": 0}]}}]}));
        assert!(equal(&a, &b));
        assert!(!equal(&a, &c));
    }

    #[test]
    fn test_large_integers() {
        assert!(equal(&v(json!(u64::MAX)), &v(json!(u64::MAX))));
        assert!(!equal(&v(json!(u64::MAX)), &v(json!(u64::MAX - 1))));
    }
}

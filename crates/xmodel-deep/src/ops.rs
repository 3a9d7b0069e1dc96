//! Non-mutating deep operations.
//!
//! The `*_at` functions work on already resolved keys and cannot fail; the
//! plain functions accept any [`ToPath`] and fail only when the path argument
//! itself is invalid.

use std::rc::Rc;

use xmodel_path::{Key, PathError, ToPath};

use crate::value::{Map, Value};

// ── Reads ───────────────────────────────────────────────────────────────

/// Walk `keys` from `value`; `None` as soon as a key is missing.
pub fn lookup<'a>(value: &'a Value, keys: &[Key]) -> Option<&'a Value> {
    let mut current = value;
    for key in keys {
        current = current.child(key)?;
    }
    Some(current)
}

/// Check if a value exists at the given path.
///
/// Presence is checked, not truthiness: a `null` at the path counts.
pub fn has(value: &Value, path: impl ToPath) -> Result<bool, PathError> {
    let path = path.to_path()?;
    Ok(lookup(value, &path).is_some())
}

/// Get the value at the given path.
pub fn get<'a>(value: &'a Value, path: impl ToPath) -> Result<Option<&'a Value>, PathError> {
    let path = path.to_path()?;
    Ok(lookup(value, &path))
}

// ── Writes ──────────────────────────────────────────────────────────────

/// How far past the end of an array an index may land before the array is
/// treated as an object keyed by its indices instead of being padded with
/// `null`.
pub const MAX_INDEX_GAP: usize = 1024;

fn within_gap(len: usize, idx: usize) -> bool {
    idx <= len.saturating_add(MAX_INDEX_GAP)
}

/// Install `new` at `keys`, copying only the containers along the way.
///
/// `value` is `None` when there is nothing to start from. When the value
/// already at `keys` is the same as `new`, the input comes back unchanged.
pub fn insert_at(value: Option<&Value>, keys: &[Key], new: Value) -> Value {
    let Some((key, rest)) = keys.split_first() else {
        return match value {
            Some(existing) if existing.same(&new) => existing.clone(),
            _ => new,
        };
    };
    let Some(current) = value else {
        return grow(key, rest, new);
    };
    match current {
        Value::Array(items) => match key.as_index() {
            Some(idx) if within_gap(items.len(), idx) => {
                let existing = items.get(idx);
                let next = insert_at(existing, rest, new);
                if existing.is_some_and(|e| e.same(&next)) {
                    return current.clone();
                }
                let mut copy = items.as_ref().clone();
                if idx < copy.len() {
                    copy[idx] = next;
                } else {
                    copy.resize(idx, Value::Null);
                    copy.push(next);
                }
                Value::Array(Rc::new(copy))
            }
            // A named field, or an index too far out: carry on with the array
            // as an object keyed by its indices.
            _ => {
                let mut map: Map = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item.clone()))
                    .collect();
                map.insert(key.as_field().into_owned(), insert_at(None, rest, new));
                Value::Object(Rc::new(map))
            }
        },
        Value::Object(map) => {
            let field = key.as_field();
            let existing = map.get(field.as_ref());
            let next = insert_at(existing, rest, new);
            if existing.is_some_and(|e| e.same(&next)) {
                return current.clone();
            }
            let mut copy = map.as_ref().clone();
            copy.insert(field.into_owned(), next);
            Value::Object(Rc::new(copy))
        }
        _ => grow(key, rest, new),
    }
}

/// Missing or scalar: build a container shaped by the key. An index beyond
/// [`MAX_INDEX_GAP`] builds an object instead of a padded array.
fn grow(key: &Key, rest: &[Key], new: Value) -> Value {
    match key {
        Key::Index(idx) if within_gap(0, *idx) => {
            let mut items = vec![Value::Null; *idx];
            items.push(insert_at(None, rest, new));
            Value::Array(Rc::new(items))
        }
        _ => {
            let mut map = Map::new();
            map.insert(key.as_field().into_owned(), insert_at(None, rest, new));
            Value::Object(Rc::new(map))
        }
    }
}

/// Remove whatever sits at `keys`.
///
/// Returns `None` when there is nothing to remove, which callers treat as
/// "keep the original". Array elements are removed and later ones shift down.
pub fn remove_at(value: &Value, keys: &[Key]) -> Option<Value> {
    let (key, rest) = keys.split_first()?;
    match value {
        Value::Array(items) => {
            let idx = key.as_index()?;
            let existing = items.get(idx)?;
            let mut copy = items.as_ref().clone();
            if rest.is_empty() {
                copy.remove(idx);
            } else {
                copy[idx] = remove_at(existing, rest)?;
            }
            Some(Value::Array(Rc::new(copy)))
        }
        Value::Object(map) => {
            let field = key.as_field();
            let existing = map.get(field.as_ref())?;
            let mut copy = map.as_ref().clone();
            if rest.is_empty() {
                copy.shift_remove(field.as_ref());
            } else {
                let next = remove_at(existing, rest)?;
                copy.insert(field.into_owned(), next);
            }
            Some(Value::Object(Rc::new(copy)))
        }
        _ => None,
    }
}

/// Get a new value with `new` set at the given path, filling in any missing
/// branches.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xmodel_deep::{set, Value};
///
/// let empty = Value::from(json!({}));
/// let next = set(&empty, "a.0.b", Value::from(1)).unwrap();
/// assert_eq!(next, json!({"a": [{"b": 1}]}));
///
/// // Setting the exact same value in the same place is idempotent.
/// let again = set(&next, "a.0.b", Value::from(1)).unwrap();
/// assert!(again.same(&next));
/// ```
pub fn set(value: &Value, path: impl ToPath, new: Value) -> Result<Value, PathError> {
    let path = path.to_path()?;
    Ok(insert_at(Some(value), &path, new))
}

/// Get a new value with the given path deleted.
///
/// Deleting something that is not there returns the input unchanged. The
/// empty path is also a no-op here; clearing a whole slot is up to the owner.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xmodel_deep::{delete, Value};
///
/// let value = Value::from(json!({"a": [{"b": 1}]}));
/// let next = delete(&value, "a.0.b").unwrap();
/// assert_eq!(next, json!({"a": [{}]}));
///
/// assert!(delete(&value, "a.0.nope").unwrap().same(&value));
/// ```
pub fn delete(value: &Value, path: impl ToPath) -> Result<Value, PathError> {
    let path = path.to_path()?;
    Ok(remove_at(value, &path).unwrap_or_else(|| value.clone()))
}

//! Conversion of path arguments into [`Path`].
//!
//! Every API that takes a path goes through [`ToPath`], so a dotted string,
//! a pre-parsed key list and a JSON path all resolve the same way.

use serde_json::Value as Json;

use crate::parse::parse_path;
use crate::types::{Key, Path};
use crate::PathError;

/// Something that can be resolved into a [`Path`].
pub trait ToPath {
    fn to_path(&self) -> Result<Path, PathError>;
}

impl ToPath for str {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(parse_path(self))
    }
}

impl ToPath for String {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(parse_path(self))
    }
}

/// A lone index is a one-key path.
impl ToPath for usize {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::from(vec![Key::Index(*self)]))
    }
}

impl ToPath for Key {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::from(vec![self.clone()]))
    }
}

impl ToPath for Path {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl ToPath for [Key] {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::from(self))
    }
}

impl<const N: usize> ToPath for [Key; N] {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::from(&self[..]))
    }
}

impl ToPath for Vec<Key> {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::from(self.as_slice()))
    }
}

/// JSON paths: a string is parsed as the dotted DSL, a number is a single
/// key, and an array lists keys literally.
impl ToPath for Json {
    fn to_path(&self) -> Result<Path, PathError> {
        match self {
            Json::String(s) => Ok(parse_path(s)),
            Json::Number(_) => Ok(Path::from(vec![json_key(self)?])),
            Json::Array(items) => items
                .iter()
                .map(json_key)
                .collect::<Result<Vec<_>, _>>()
                .map(Path::from),
            Json::Null => Err(PathError::InvalidPath("path is null")),
            Json::Bool(_) => Err(PathError::InvalidPath("path must be a string, number or array")),
            Json::Object(_) => Err(PathError::InvalidPath("path must be a string, number or array")),
        }
    }
}

fn json_key(item: &Json) -> Result<Key, PathError> {
    match item {
        Json::String(s) => Ok(Key::Field(s.clone())),
        Json::Number(n) => match n.as_u64().and_then(|v| usize::try_from(v).ok()) {
            Some(idx) => Ok(Key::Index(idx)),
            None => Ok(Key::Field(n.to_string())),
        },
        _ => Err(PathError::InvalidPath("path keys must be strings or numbers")),
    }
}

/// A missing path is an error, not the empty path.
impl<T: ToPath> ToPath for Option<T> {
    fn to_path(&self) -> Result<Path, PathError> {
        match self {
            Some(inner) => inner.to_path(),
            None => Err(PathError::InvalidPath("path is missing")),
        }
    }
}

impl<T: ToPath + ?Sized> ToPath for &T {
    fn to_path(&self) -> Result<Path, PathError> {
        (**self).to_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_and_slice_agree() {
        let parsed = "a.0.b".to_path().unwrap();
        let listed = [Key::from("a"), Key::Index(0), Key::from("b")].to_path().unwrap();
        assert_eq!(parsed, listed);
    }

    #[test]
    fn test_number_is_single_key() {
        assert_eq!(4usize.to_path().unwrap(), vec![Key::Index(4)]);
        assert_eq!(json!(4).to_path().unwrap(), vec![Key::Index(4)]);
        assert_eq!(json!(-1).to_path().unwrap(), vec![Key::from("-1")]);
    }

    #[test]
    fn test_json_array_keys_are_literal() {
        let path = json!([999, "b.a.r", "baz", "0"]).to_path().unwrap();
        assert_eq!(
            path,
            vec![Key::Index(999), Key::from("b.a.r"), Key::from("baz"), Key::from("0")]
        );
    }

    #[test]
    fn test_missing_path_is_invalid() {
        assert!(matches!(None::<&str>.to_path(), Err(PathError::InvalidPath(_))));
        assert!(matches!(json!(null).to_path(), Err(PathError::InvalidPath(_))));
        assert!(matches!(json!(true).to_path(), Err(PathError::InvalidPath(_))));
        assert!(matches!(json!({"a": 1}).to_path(), Err(PathError::InvalidPath(_))));
        assert!(matches!(json!(["a", null]).to_path(), Err(PathError::InvalidPath(_))));
    }

    #[test]
    fn test_empty_slice_is_root() {
        let empty: Vec<Key> = Vec::new();
        assert!(empty.to_path().unwrap().is_empty());
        assert_eq!(Some("").to_path().unwrap(), vec![Key::from("")]);
    }
}

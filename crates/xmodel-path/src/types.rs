//! Type definitions for key paths.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::util::is_index;

/// A step in a path.
///
/// Either a sequence index or a mapping field. Child keys in a model tree are
/// always fields; indices only appear in data paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(usize),
    Field(String),
}

impl Key {
    /// The sequence index this key addresses, if any.
    ///
    /// A field that spells a canonical index (`"3"`) addresses that element,
    /// the same way a numeric key addresses the field `"3"` of a mapping.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(idx) => Some(*idx),
            Key::Field(field) if is_index(field) => field.parse().ok(),
            Key::Field(_) => None,
        }
    }

    /// The mapping field this key addresses.
    pub fn as_field(&self) -> Cow<'_, str> {
        match self {
            Key::Index(idx) => Cow::Owned(idx.to_string()),
            Key::Field(field) => Cow::Borrowed(field),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(idx) => write!(f, "{idx}"),
            Key::Field(field) => f.write_str(field),
        }
    }
}

impl From<usize> for Key {
    fn from(idx: usize) -> Self {
        Key::Index(idx)
    }
}

impl From<&str> for Key {
    fn from(field: &str) -> Self {
        Key::Field(field.to_string())
    }
}

impl From<String> for Key {
    fn from(field: String) -> Self {
        Key::Field(field)
    }
}

impl From<&String> for Key {
    fn from(field: &String) -> Self {
        Key::Field(field.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// An immutable, cheaply clonable sequence of keys.
///
/// Clones share one allocation, which is how the parse cache hands out the
/// same path for the same source string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Path(Rc<[Key]>);

impl Path {
    /// The empty path, which addresses the root value itself.
    pub fn root() -> Self {
        Path(Rc::from(Vec::new()))
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// A new path with `key` appended.
    pub fn child(&self, key: impl Into<Key>) -> Path {
        let mut keys = self.0.to_vec();
        keys.push(key.into());
        Path::from(keys)
    }

    /// A new path with all of `tail` appended.
    pub fn join(&self, tail: &[Key]) -> Path {
        if tail.is_empty() {
            return self.clone();
        }
        if self.0.is_empty() {
            return Path::from(tail);
        }
        let mut keys = Vec::with_capacity(self.0.len() + tail.len());
        keys.extend_from_slice(&self.0);
        keys.extend_from_slice(tail);
        Path::from(keys)
    }

    /// Returns `true` when both paths share the same allocation.
    pub fn ptr_eq(&self, other: &Path) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::root()
    }
}

impl Deref for Path {
    type Target = [Key];

    fn deref(&self) -> &[Key] {
        &self.0
    }
}

impl AsRef<[Key]> for Path {
    fn as_ref(&self) -> &[Key] {
        &self.0
    }
}

impl From<Vec<Key>> for Path {
    fn from(keys: Vec<Key>) -> Self {
        Path(Rc::from(keys))
    }
}

impl From<&[Key]> for Path {
    fn from(keys: &[Key]) -> Self {
        Path(Rc::from(keys))
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl PartialEq<[Key]> for Path {
    fn eq(&self, other: &[Key]) -> bool {
        *self.0 == *other
    }
}

impl PartialEq<Vec<Key>> for Path {
    fn eq(&self, other: &Vec<Key>) -> bool {
        *self.0 == **other
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_as_index() {
        assert_eq!(Key::Index(3).as_index(), Some(3));
        assert_eq!(Key::from("3").as_index(), Some(3));
        assert_eq!(Key::from("03").as_index(), None);
        assert_eq!(Key::from("foo").as_index(), None);
    }

    #[test]
    fn test_key_as_field() {
        assert_eq!(Key::Index(7).as_field(), "7");
        assert_eq!(Key::from("bar").as_field(), "bar");
    }

    #[test]
    fn test_path_join() {
        let base = Path::from(vec![Key::from("a")]);
        let joined = base.join(&[Key::Index(0), Key::from("b")]);
        assert_eq!(joined, vec![Key::from("a"), Key::Index(0), Key::from("b")]);

        // Joining nothing hands back the same allocation.
        assert!(base.join(&[]).ptr_eq(&base));
    }

    #[test]
    fn test_path_child() {
        let path = Path::root().child("a").child(2usize);
        assert_eq!(path.to_string(), "a.2");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_path_display() {
        assert_eq!(Path::root().to_string(), "");
        let path: Path = vec![Key::from("one"), Key::from("two"), Key::Index(3)].into();
        assert_eq!(path.to_string(), "one.two.3");
    }
}

//! Key paths for xmodel.
//!
//! A path is an ordered list of keys locating a value inside nested
//! sequences and mappings. Paths are written in a dotted DSL (`"a.0.b"`) or
//! handed over pre-parsed as a list of [`Key`]s.
//!
//! # Example
//!
//! ```
//! use xmodel_path::{format_path, parse_path, Key, ToPath};
//!
//! // Canonical integer segments become indices.
//! let path = parse_path("one.two.3");
//! assert_eq!(path, vec![Key::from("one"), Key::from("two"), Key::Index(3)]);
//!
//! // Parsing is memoized per input string.
//! assert!(path.ptr_eq(&parse_path("one.two.3")));
//!
//! // Pre-parsed keys are taken literally.
//! let listed = vec![Key::from("b.a.r"), Key::Index(0)].to_path().unwrap();
//! assert_eq!(listed.len(), 2);
//!
//! assert_eq!(format_path(&path), "one.two.3");
//! ```

use thiserror::Error;

pub mod input;
pub mod parse;
pub mod types;
pub mod util;

pub use input::ToPath;
pub use parse::{parse_path, path_cache_len};
pub use types::{Key, Path};
pub use util::{format_path, is_child, is_index, is_root, parent};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),
}

//! xmodel-deep - Frozen values and deep edits for xmodel
//!
//! A [`Value`] is an immutable JSON-like tree. Reads walk a path and hand back
//! a reference into the tree; writes return a new tree that shares every
//! branch the write did not touch.
//!
//! ```
//! use serde_json::json;
//! use xmodel_deep::{delete, get, has, set, Value};
//!
//! let state = Value::from(json!({"todos": [{"done": false}]}));
//! let next = set(&state, "todos.0.done", Value::from(true)).unwrap();
//!
//! assert_eq!(get(&next, "todos.0.done").unwrap(), Some(&Value::from(true)));
//! assert_eq!(get(&state, "todos.0.done").unwrap(), Some(&Value::from(false)));
//!
//! let emptied = delete(&next, "todos.0").unwrap();
//! assert!(!has(&emptied, "todos.0").unwrap());
//! ```

pub mod clone;
pub mod equal;
pub mod freeze;
pub mod ops;
pub mod value;

pub use clone::{clone, clone_shallow};
pub use equal::equal;
pub use freeze::{freeze, thaw, Freeze};
pub use ops::{delete, get, has, insert_at, lookup, remove_at, set, MAX_INDEX_GAP};
pub use value::{Map, Value};

pub use xmodel_path::{Key, Path, PathError, ToPath};

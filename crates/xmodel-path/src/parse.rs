//! Dotted path parsing with a per-thread memo.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::types::{Key, Path};
use crate::util::is_index;

thread_local! {
    // Entries live as long as the thread; paths are immutable once cached.
    static PATHS: RefCell<HashMap<String, Path>> = RefCell::new(HashMap::new());
}

/// Split a dotted path into keys.
///
/// Segments spelling a canonical non-negative integer become
/// [`Key::Index`]; everything else, including the empty segment, is a
/// [`Key::Field`]. Results are memoized on the literal input, so parsing the
/// same string twice returns the same shared [`Path`].
pub fn parse_path(input: &str) -> Path {
    if let Some(hit) = PATHS.with(|paths| paths.borrow().get(input).cloned()) {
        return hit;
    }
    let path: Path = input.split('.').map(parse_segment).collect();
    PATHS.with(|paths| {
        paths
            .borrow_mut()
            .entry(input.to_string())
            .or_insert(path)
            .clone()
    })
}

fn parse_segment(segment: &str) -> Key {
    if is_index(segment) {
        if let Ok(idx) = segment.parse() {
            return Key::Index(idx);
        }
    }
    Key::Field(segment.to_string())
}

/// Number of distinct path strings parsed on this thread.
pub fn path_cache_len() -> usize {
    PATHS.with(|paths| paths.borrow().len())
}

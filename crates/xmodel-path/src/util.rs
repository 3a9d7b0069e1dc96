use crate::types::{Key, Path};

/// Check if a string is a canonical non-negative integer literal.
///
/// `"0"` and `"17"` qualify; `"01"`, `"-1"`, `"1.5"` and values that do not
/// fit a `usize` stay plain fields.
pub fn is_index(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    let bytes = segment.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit()) && segment.parse::<usize>().is_ok()
}

/// Format a path back into the dotted DSL.
///
/// For paths whose fields contain no `.` and do not spell an index this is the
/// inverse of [`parse_path`](crate::parse_path).
pub fn format_path(path: &[Key]) -> String {
    let mut out = String::new();
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&key.as_field());
    }
    out
}

/// Check if a path points to the root value.
pub fn is_root(path: &[Key]) -> bool {
    path.is_empty()
}

/// Check if `parent` path contains the `child` path.
pub fn is_child(parent: &[Key], child: &[Key]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// Get the parent path of a given path, `None` for the root.
pub fn parent(path: &[Key]) -> Option<Path> {
    if path.is_empty() {
        return None;
    }
    Some(Path::from(&path[..path.len() - 1]))
}

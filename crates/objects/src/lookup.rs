//! Dotted-path resolution through nested objects and arrays.
//!
//! A path such as `people.0.name` is split on `.`; each segment indexes an
//! object by string key or an array by non-negative integer. Any miss (absent
//! key, malformed or out-of-range index, indexing into a scalar) ends the walk
//! and the caller's default is returned instead.

use policy_core::{Term, Value};
use tracing::trace;

pub const PATH_SEPARATOR: char = '.';

/// Resolve `path` against `root`, falling back to `default` on any miss.
pub fn lookup_path(root: &Term, path: &str, default: &Term) -> Term {
    let mut current = root;
    for segment in path.split(PATH_SEPARATOR) {
        match step(current, segment) {
            Some(next) => current = next,
            None => {
                trace!(segment, shape = current.type_name(), "path lookup miss");
                return default.clone();
            }
        }
    }
    current.clone()
}

fn step<'a>(current: &'a Term, segment: &str) -> Option<&'a Term> {
    match current.value() {
        Value::Object(obj) => obj.get(&Term::string(segment)),
        Value::Array(items) => {
            let idx: usize = segment.parse().ok()?;
            // Out-of-range indices, including idx == len, miss here.
            items.get(idx)
        }
        _ => None,
    }
}

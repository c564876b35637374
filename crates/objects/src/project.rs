//! Key-based narrowing of objects: drop listed keys, or keep only them.

use policy_core::{Object, Result, Set, Term};

/// Entries of `obj` whose key is not in `keys`.
pub fn remove_keys(obj: &Object, keys: &Set) -> Object {
    obj.iter()
        .filter(|(k, _)| !keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Entries of `obj` whose key is in `keys`.
///
/// Builds a flat projection spec (every key mapped to `null`) and hands it to
/// [`Object::filter`].
pub fn filter_keys(obj: &Object, keys: &Set) -> Result<Object> {
    let spec: Object = keys.iter().map(|k| (k.clone(), Term::null())).collect();
    obj.filter(&spec)
}

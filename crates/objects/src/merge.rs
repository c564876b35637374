//! Right-biased deep merge of two objects.

use policy_core::{Object, Term};
use tracing::trace;

/// Deep-merge two objects: overlay entries win, nested objects merge.
///
/// For keys present on both sides whose values are both objects, recurse.
/// For every other conflict (scalars, arrays, sets, mixed shapes) the overlay
/// value replaces the base value. Untouched values are shared, not copied.
pub fn deep_merge(base: &Object, overlay: &Object) -> Object {
    let mut merged = base.clone();
    for (key, over_val) in overlay {
        let value = match base.get(key) {
            Some(base_val) => match (base_val.as_object(), over_val.as_object()) {
                (Some(b), Some(o)) => Term::object(deep_merge(b, o)),
                _ => {
                    trace!(key = %key, "merge conflict, overlay value wins");
                    over_val.clone()
                }
            },
            None => over_val.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: serde_json::Value) -> Object {
        Term::from(v).as_object().cloned().unwrap()
    }

    #[test]
    fn nested_objects_merge() {
        let merged = deep_merge(&obj(json!({"a": {"x": 1}})), &obj(json!({"a": {"y": 2}})));
        assert_eq!(merged, obj(json!({"a": {"x": 1, "y": 2}})));
    }

    #[test]
    fn overlay_scalar_wins() {
        let merged = deep_merge(&obj(json!({"a": 1, "b": 2})), &obj(json!({"b": 3})));
        assert_eq!(merged, obj(json!({"a": 1, "b": 3})));
    }

    #[test]
    fn arrays_replace_entirely() {
        let merged = deep_merge(&obj(json!({"a": [1, 2, 3]})), &obj(json!({"a": [4]})));
        assert_eq!(merged, obj(json!({"a": [4]})));
    }

    #[test]
    fn object_replaces_scalar_and_back() {
        let merged = deep_merge(&obj(json!({"a": 1, "b": {"x": 1}})), &obj(json!({"a": {"x": 1}, "b": 2})));
        assert_eq!(merged, obj(json!({"a": {"x": 1}, "b": 2})));
    }

    #[test]
    fn deep_nesting_merges_at_every_level() {
        let base = obj(json!({"a": {"b": {"c": {"d": 1, "keep": true}}}}));
        let overlay = obj(json!({"a": {"b": {"c": {"d": 2}, "new": null}}}));
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, obj(json!({"a": {"b": {"c": {"d": 2, "keep": true}, "new": null}}})));
    }

    #[test]
    fn empty_sides() {
        let a = obj(json!({"a": 1}));
        assert_eq!(deep_merge(&a, &Object::new()), a);
        assert_eq!(deep_merge(&Object::new(), &a), a);
    }

    #[test]
    fn inputs_are_untouched_and_values_shared() {
        let base = obj(json!({"left": [1, 2], "both": {"x": 1}}));
        let overlay = obj(json!({"right": {"deep": true}, "both": {"y": 2}}));
        let base_before = base.clone();
        let overlay_before = overlay.clone();

        let merged = deep_merge(&base, &overlay);

        assert_eq!(base, base_before);
        assert_eq!(overlay, overlay_before);
        let left = Term::string("left");
        let right = Term::string("right");
        assert!(merged.get(&left).unwrap().ptr_eq(base.get(&left).unwrap()));
        assert!(merged.get(&right).unwrap().ptr_eq(overlay.get(&right).unwrap()));
    }
}

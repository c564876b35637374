use policy_core::{BuiltinError, Result, Set, Term, Value};

/// Normalize the "keys" operand of `object.remove` / `object.filter`.
///
/// Arrays and sets contribute their elements; objects contribute their keys.
pub fn key_set(keys: &Term) -> Result<Set> {
    match keys.value() {
        Value::Array(items) => Ok(items.iter().cloned().collect()),
        Value::Set(set) => Ok(set.clone()),
        Value::Object(obj) => Ok(obj.keys().cloned().collect()),
        _ => Err(BuiltinError::operand_type(
            2,
            keys.type_name(),
            &["object", "set", "array"],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_elements_become_members() {
        let set = key_set(&Term::from(json!(["a", "b", "a"]))).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Term::string("a")));
        assert!(set.contains(&Term::string("b")));
    }

    #[test]
    fn object_keys_become_members_not_values() {
        let set = key_set(&Term::from(json!({"a": "x", "b": "y"}))).unwrap();
        assert!(set.contains(&Term::string("a")));
        assert!(!set.contains(&Term::string("x")));
    }

    #[test]
    fn all_shapes_agree() {
        let from_array = key_set(&Term::from(json!(["a", "b"]))).unwrap();
        let from_object = key_set(&Term::from(json!({"a": 1, "b": 2}))).unwrap();
        let as_set: Set = [Term::string("b"), Term::string("a")].into_iter().collect();
        let from_set = key_set(&Term::set(as_set)).unwrap();
        assert_eq!(from_array, from_object);
        assert_eq!(from_array, from_set);
    }

    #[test]
    fn scalars_are_rejected() {
        let err = key_set(&Term::string("a")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operand 2 must be one of {object, set, array} but got string"
        );
    }
}

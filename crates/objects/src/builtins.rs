//! `object.*` builtin entry points and their registration.
//!
//! Each entry point validates operand shapes, computes its result and hands
//! it to the continuation exactly once. Operand counts are enforced by the
//! registry before dispatch.

use policy_core::operands::{object_operand, string_operand};
use policy_core::{Builtin, BuiltinRegistry, Iter, Result, Term};

use crate::keys::key_set;
use crate::lookup::lookup_path;
use crate::merge::deep_merge;
use crate::project::{filter_keys, remove_keys};

pub const OBJECT_UNION: Builtin = Builtin {
    name: "object.union",
    arity: 2,
    func: builtin_object_union,
};

pub const OBJECT_REMOVE: Builtin = Builtin {
    name: "object.remove",
    arity: 2,
    func: builtin_object_remove,
};

pub const OBJECT_FILTER: Builtin = Builtin {
    name: "object.filter",
    arity: 2,
    func: builtin_object_filter,
};

pub const OBJECT_GET: Builtin = Builtin {
    name: "object.get",
    arity: 3,
    func: builtin_object_get,
};

pub const OBJECT_LOOKUP: Builtin = Builtin {
    name: "object.lookup",
    arity: 3,
    func: builtin_object_lookup,
};

pub const OBJECT_BUILTINS: [Builtin; 5] = [
    OBJECT_UNION,
    OBJECT_REMOVE,
    OBJECT_FILTER,
    OBJECT_GET,
    OBJECT_LOOKUP,
];

/// Register every `object.*` builtin.
pub fn register_object_builtins(registry: &mut BuiltinRegistry) -> Result<()> {
    for builtin in OBJECT_BUILTINS {
        registry.register(builtin)?;
    }
    Ok(())
}

/// A registry preloaded with the `object.*` builtins.
pub fn registry() -> Result<BuiltinRegistry> {
    let mut registry = BuiltinRegistry::new();
    register_object_builtins(&mut registry)?;
    Ok(registry)
}

fn builtin_object_union(operands: &[Term], iter: &mut Iter<'_>) -> Result<()> {
    let a = object_operand(&operands[0], 1)?;
    let b = object_operand(&operands[1], 2)?;
    iter(Term::object(deep_merge(a, b)))
}

fn builtin_object_remove(operands: &[Term], iter: &mut Iter<'_>) -> Result<()> {
    let obj = object_operand(&operands[0], 1)?;
    let keys = key_set(&operands[1])?;
    iter(Term::object(remove_keys(obj, &keys)))
}

fn builtin_object_filter(operands: &[Term], iter: &mut Iter<'_>) -> Result<()> {
    let obj = object_operand(&operands[0], 1)?;
    let keys = key_set(&operands[1])?;
    iter(Term::object(filter_keys(obj, &keys)?))
}

fn builtin_object_get(operands: &[Term], iter: &mut Iter<'_>) -> Result<()> {
    let obj = object_operand(&operands[0], 1)?;
    match obj.get(&operands[1]) {
        Some(found) => iter(found.clone()),
        None => iter(operands[2].clone()),
    }
}

fn builtin_object_lookup(operands: &[Term], iter: &mut Iter<'_>) -> Result<()> {
    let path = string_operand(&operands[1], 2)?;
    iter(lookup_path(&operands[0], path, &operands[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_core::BuiltinError;
    use serde_json::json;

    fn call(builtin: Builtin, operands: &[serde_json::Value]) -> Result<Vec<Term>> {
        let operands: Vec<Term> = operands.iter().cloned().map(Term::from).collect();
        let mut results = Vec::new();
        (builtin.func)(&operands, &mut |t| {
            results.push(t);
            Ok(())
        })?;
        Ok(results)
    }

    #[test]
    fn each_entry_point_yields_exactly_once() {
        let cases = [
            (OBJECT_UNION, vec![json!({"a": 1}), json!({"b": 2})]),
            (OBJECT_REMOVE, vec![json!({"a": 1}), json!(["a"])]),
            (OBJECT_FILTER, vec![json!({"a": 1}), json!(["a"])]),
            (OBJECT_GET, vec![json!({"a": 1}), json!("a"), json!(0)]),
            (OBJECT_LOOKUP, vec![json!({"a": 1}), json!("a"), json!(0)]),
        ];
        for (builtin, operands) in cases {
            let results = call(builtin, &operands).unwrap();
            assert_eq!(results.len(), 1, "{} should yield once", builtin.name);
        }
    }

    #[test]
    fn errors_skip_the_continuation() {
        let mut called = false;
        let operands = [Term::int(1), Term::from(json!({}))];
        let err = (OBJECT_UNION.func)(&operands, &mut |_| {
            called = true;
            Ok(())
        })
        .unwrap_err();
        assert!(!called);
        assert_eq!(err, BuiltinError::operand_type(1, "number", &["object"]));
    }

    #[test]
    fn union_checks_second_operand() {
        let err = call(OBJECT_UNION, &[json!({}), json!([1])]).unwrap_err();
        assert_eq!(err, BuiltinError::operand_type(2, "array", &["object"]));
    }

    #[test]
    fn get_returns_stored_or_default() {
        let found = call(OBJECT_GET, &[json!({"a": {"b": 1}}), json!("a"), json!("d")]).unwrap();
        assert_eq!(found[0], Term::from(json!({"b": 1})));
        let missing = call(OBJECT_GET, &[json!({"a": 1}), json!("z"), json!("d")]).unwrap();
        assert_eq!(missing[0], Term::string("d"));
    }

    #[test]
    fn get_requires_an_object() {
        let err = call(OBJECT_GET, &[json!("x"), json!("a"), json!("d")]).unwrap_err();
        assert_eq!(err.to_string(), "operand 1 must be object but got string");
    }

    #[test]
    fn lookup_requires_string_path() {
        let err = call(OBJECT_LOOKUP, &[json!({"a": 1}), json!(1), json!("d")]).unwrap_err();
        assert_eq!(err, BuiltinError::operand_type(2, "number", &["string"]));
    }

    #[test]
    fn lookup_accepts_non_object_roots() {
        let out = call(OBJECT_LOOKUP, &[json!([["x"]]), json!("0.0"), json!("d")]).unwrap();
        assert_eq!(out[0], Term::string("x"));
    }

    #[test]
    fn remove_and_filter_reject_scalar_keys() {
        for builtin in [OBJECT_REMOVE, OBJECT_FILTER] {
            let err = call(builtin, &[json!({"a": 1}), json!("a")]).unwrap_err();
            assert_eq!(
                err,
                BuiltinError::operand_type(2, "string", &["object", "set", "array"])
            );
        }
    }

    #[test]
    fn registry_contains_all_object_builtins() {
        let registry = registry().unwrap();
        assert_eq!(
            registry.names(),
            vec!["object.filter", "object.get", "object.lookup", "object.remove", "object.union"]
        );
    }

    #[test]
    fn registering_twice_fails() {
        let mut registry = registry().unwrap();
        let err = register_object_builtins(&mut registry).unwrap_err();
        assert_eq!(err, BuiltinError::DuplicateName("object.union".to_string()));
    }
}

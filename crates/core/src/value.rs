//! Immutable, structurally comparable values handed to builtins.
//!
//! Every [`Term`] is an `Arc` around a [`Value`], so cloning a term is cheap
//! and derived structures share whatever substructure they did not change.
//! Equality, ordering and hashing are structural all the way down, which is
//! what makes terms usable as [`Object`] keys and [`Set`] members.

use std::cmp::Ordering;
use std::collections::{btree_map, btree_set, BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BuiltinError, Result};

// ── Number ────────────────────────────────────────────────────

/// IEEE 754 number with a total order so it can live inside keys.
#[derive(Debug, Clone, Copy)]
pub struct Number(f64);

impl Number {
    pub fn new(v: f64) -> Self {
        // -0.0 and 0.0 must compare and hash identically.
        Number(if v == 0.0 { 0.0 } else { v })
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// The value as an `i64` when it is integral and in range.
    pub fn as_i64(&self) -> Option<i64> {
        let v = self.0;
        if v.fract() == 0.0 && v.abs() < 9.0e15 {
            Some(v as i64)
        } else {
            None
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_i64() {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "{}", self.0),
        }
    }
}

// ── Value / Term ──────────────────────────────────────────────

/// The closed set of shapes a term can take.
///
/// Variant order doubles as the cross-type sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Array(Vec<Term>),
    Object(Object),
    Set(Set),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Set(_) => "set",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(Arc<Value>);

impl Term {
    pub fn new(value: Value) -> Self {
        Term(Arc::new(value))
    }

    pub fn null() -> Self {
        Term::new(Value::Null)
    }

    pub fn boolean(b: bool) -> Self {
        Term::new(Value::Boolean(b))
    }

    pub fn number(v: f64) -> Self {
        Term::new(Value::Number(Number::new(v)))
    }

    pub fn int(i: i64) -> Self {
        Term::number(i as f64)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Term::new(Value::String(s.into()))
    }

    pub fn array(items: Vec<Term>) -> Self {
        Term::new(Value::Array(items))
    }

    pub fn object(obj: Object) -> Self {
        Term::new(Value::Object(obj))
    }

    pub fn set(set: Set) -> Self {
        Term::new(Value::Set(set))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    pub fn as_object(&self) -> Option<&Object> {
        match &*self.0 {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &*self.0 {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True when both terms point at the same allocation.
    pub fn ptr_eq(&self, other: &Term) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Convert to JSON. Sets become arrays. Objects whose keys are all
    /// strings keep them as-is; if any key is not a string, every key is
    /// rendered in policy syntax (strings quoted) so distinct keys stay
    /// distinct.
    pub fn to_json(&self) -> serde_json::Value {
        match &*self.0 {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(n.as_f64())
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => items.iter().map(Term::to_json).collect(),
            Value::Set(set) => set.iter().map(Term::to_json).collect(),
            Value::Object(obj) => {
                let plain_keys = obj.keys().all(|k| k.as_str().is_some());
                let map = obj
                    .iter()
                    .map(|(k, v)| {
                        let key = match k.as_str() {
                            Some(s) if plain_keys => s.to_string(),
                            _ => k.to_string(),
                        };
                        (key, v.to_json())
                    })
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }
}

impl From<serde_json::Value> for Term {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Term::null(),
            serde_json::Value::Bool(b) => Term::boolean(b),
            serde_json::Value::Number(n) => Term::number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Term::string(s),
            serde_json::Value::Array(items) => {
                Term::array(items.into_iter().map(Term::from).collect())
            }
            serde_json::Value::Object(map) => Term::object(
                map.into_iter()
                    .map(|(k, v)| (Term::string(k), Term::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::string(s)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::boolean(b)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::int(i)
    }
}

impl From<Object> for Term {
    fn from(obj: Object) -> Self {
        Term::object(obj)
    }
}

impl From<Set> for Term {
    fn from(set: Set) -> Self {
        Term::set(set)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Term::from)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
            Value::Array(items) => {
                f.write_str("[")?;
                write_joined(f, items.iter())?;
                f.write_str("]")
            }
            Value::Set(set) if set.is_empty() => f.write_str("set()"),
            Value::Set(set) => {
                f.write_str("{")?;
                write_joined(f, set.iter())?;
                f.write_str("}")
            }
            Value::Object(obj) => {
                f.write_str("{")?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_joined<'a>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = &'a Term>) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// ── Object ────────────────────────────────────────────────────

/// Key-unique mapping from term to term.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Object(BTreeMap<Term, Term>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Term) -> Option<&Term> {
        self.0.get(key)
    }

    /// Insert, replacing any existing value under an equal key.
    pub fn insert(&mut self, key: Term, value: Term) -> Option<Term> {
        self.0.insert(key, value)
    }

    pub fn contains_key(&self, key: &Term) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Term, Term> {
        self.0.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Term, Term> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Project this object through `spec`.
    ///
    /// Every key of `spec` that is also present here is kept. A `null` spec
    /// value keeps the whole entry; an object spec value recurses into an
    /// object (by key) or an array (by integer index). Any other spec value,
    /// or an object spec over a scalar, is a projection error.
    pub fn filter(&self, spec: &Object) -> Result<Object> {
        let mut out = Object::new();
        for (key, sub) in spec.iter() {
            let Some(value) = self.get(key) else {
                continue;
            };
            out.insert(key.clone(), project(value, sub)?);
        }
        Ok(out)
    }
}

fn project(value: &Term, spec: &Term) -> Result<Term> {
    match (value.value(), spec.value()) {
        (_, Value::Null) => Ok(value.clone()),
        (Value::Object(obj), Value::Object(sub)) => Ok(Term::object(obj.filter(sub)?)),
        (Value::Array(items), Value::Object(sub)) => {
            let mut kept = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                if let Some(item_spec) = sub.get(&Term::int(idx as i64)) {
                    kept.push(project(item, item_spec)?);
                }
            }
            Ok(Term::array(kept))
        }
        (_, Value::Object(_)) => Err(BuiltinError::Projection(format!(
            "cannot project into {}",
            value.type_name()
        ))),
        _ => Err(BuiltinError::Projection(format!(
            "filter values must be null or object, got {}",
            spec.type_name()
        ))),
    }
}

impl FromIterator<(Term, Term)> for Object {
    fn from_iter<I: IntoIterator<Item = (Term, Term)>>(iter: I) -> Self {
        Object(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a Term, &'a Term);
    type IntoIter = btree_map::Iter<'a, Term, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Set ───────────────────────────────────────────────────────

/// Collection of unique terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Set(BTreeSet<Term>);

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when an equal term was already present.
    pub fn insert(&mut self, term: Term) -> bool {
        self.0.insert(term)
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.0.contains(term)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Term> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Term> for Set {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Set(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Term;
    type IntoIter = btree_set::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────

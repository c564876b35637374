//! `object.*` builtins for the policy rule engine.
//!
//! This crate provides:
//! - `object.union`: right-biased deep merge of two objects
//! - `object.remove` / `object.filter`: drop or keep keys given as an array, set or object
//! - `object.get`: single-key lookup with a default
//! - `object.lookup`: dotted-path resolution through objects and arrays with a default

pub mod builtins;
pub mod keys;
pub mod lookup;
pub mod merge;
pub mod project;

pub use builtins::{register_object_builtins, registry, OBJECT_BUILTINS};
pub use keys::key_set;
pub use lookup::lookup_path;
pub use merge::deep_merge;
pub use project::{filter_keys, remove_keys};

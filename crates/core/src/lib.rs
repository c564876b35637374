pub mod config;
pub mod error;
pub mod operands;
pub mod registry;
pub mod value;

pub use config::EvalConfig;
pub use error::*;
pub use registry::{Builtin, BuiltinFn, BuiltinRegistry, Iter};
pub use value::{Number, Object, Set, Term, Value};

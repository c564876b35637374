//! Shape assertions for builtin operands. Positions are 1-based.

use crate::error::{BuiltinError, Result};
use crate::value::{Object, Term};

pub fn object_operand(term: &Term, position: usize) -> Result<&Object> {
    term.as_object()
        .ok_or_else(|| BuiltinError::operand_type(position, term.type_name(), &["object"]))
}

pub fn string_operand(term: &Term, position: usize) -> Result<&str> {
    term.as_str()
        .ok_or_else(|| BuiltinError::operand_type(position, term.type_name(), &["string"]))
}

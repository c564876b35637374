use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuiltinError {
    /// Operand at `position` (1-based) has the wrong shape.
    #[error("operand {position} must be {} but got {actual}", expected_phrase(.expected))]
    OperandType {
        position: usize,
        actual: &'static str,
        expected: Vec<&'static str>,
    },

    #[error("{name}: expected {expected} operands, got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown builtin: {0}")]
    UnknownBuiltin(String),

    #[error("builtin '{0}' is already registered")]
    DuplicateName(String),

    #[error("invalid projection: {0}")]
    Projection(String),

    #[error("{0} produced no result")]
    NoResult(String),
}

impl BuiltinError {
    pub fn operand_type(position: usize, actual: &'static str, expected: &[&'static str]) -> Self {
        BuiltinError::OperandType {
            position,
            actual,
            expected: expected.to_vec(),
        }
    }
}

fn expected_phrase(expected: &[&'static str]) -> String {
    match expected {
        [single] => (*single).to_string(),
        many => format!("one of {{{}}}", many.join(", ")),
    }
}

pub type Result<T> = std::result::Result<T, BuiltinError>;

use thiserror::Error;

use crate::interval::IntervalError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("operation '{op}' not implemented for {operand}")]
    NotImplemented { op: String, operand: &'static str },
    #[error("operation '{op}' not implemented between {left} and {right}")]
    OperandMismatch {
        op: String,
        left: &'static str,
        right: &'static str,
    },
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
    #[error("'{0}' is not a function")]
    NotAFunction(String),
    #[error("argument mismatch for {name}, expected {expected} but got {got}")]
    ArgumentMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("bound of interval {name} must be a number, got {got}")]
    NonNumericBound { name: String, got: &'static str },
    #[error("{function} expects intervals or numbers, got {got}")]
    NonIntervalArgument {
        function: &'static str,
        got: &'static str,
    },
    #[error(transparent)]
    Interval(#[from] IntervalError),
}

pub type EvalResult<T> = Result<T, SemanticError>;

use thiserror::Error;

use crate::lex::Location;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {location}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub location: Location,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("malformed interval literal, {0}")]
    MalformedInterval(&'static str),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
    #[error("expected '{expected}' but found '{found}'")]
    Expected { expected: String, found: String },
    #[error("'{found}' cannot be used as {role}")]
    InvalidOperand { role: &'static str, found: String },
    #[error("binding power must be a non-negative integer, got '{0}'")]
    InvalidPower(String),
}

pub type ParseResult<T> = Result<T, SyntaxError>;

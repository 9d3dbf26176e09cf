use std::rc::Rc;

use malachite::num::float::NiceFloat;

use crate::interval::Interval;

pub mod operators;
pub use operators::*;

pub mod symbol;
pub use symbol::{Interner, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(NiceFloat<f64>),
    Interval(Interval),
    Symbol(Symbol),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Branch {
        condition: Box<Node>,
        then: Box<Node>,
        otherwise: Box<Node>,
    },
    Composite {
        head: Symbol,
        args: Vec<Node>,
        bracket: Bracket,
    },
    Function(Rc<Function>),
}

/// `fun head(params) is body end`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub head: Symbol,
    pub params: Vec<Symbol>,
    pub body: Node,
}

impl Node {
    pub const ZERO: Self = Self::Number(NiceFloat(0.0));
    pub const ONE: Self = Self::Number(NiceFloat(1.0));

    pub fn number(val: f64) -> Self {
        Self::Number(NiceFloat(val))
    }

    pub fn boolean(b: bool) -> Self {
        if b { Self::ONE } else { Self::ZERO }
    }

    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: operand.into(),
        }
    }

    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn branch(condition: Self, then: Self, otherwise: Self) -> Self {
        Self::Branch {
            condition: condition.into(),
            then: then.into(),
            otherwise: otherwise.into(),
        }
    }

    pub fn function(head: Symbol, params: Vec<Symbol>, body: Self) -> Self {
        Self::Function(Rc::new(Function { head, params, body }))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(val.0),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<Interval> {
        match self {
            Self::Interval(x) => Some(*x),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Interval(_) => "interval",
            Self::Symbol(_) => "symbol",
            Self::Unary { .. } => "unary operation",
            Self::Binary { .. } => "binary operation",
            Self::Branch { .. } => "branch",
            Self::Composite { .. } => "composite",
            Self::Function(_) => "function",
        }
    }

    /// Only numbers can be false, and only when they are zero.
    pub fn is_true(&self) -> bool {
        match self {
            Self::Number(val) => val.0 != 0.0,
            _ => true,
        }
    }
}

impl From<Interval> for Node {
    fn from(value: Interval) -> Self {
        Self::Interval(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

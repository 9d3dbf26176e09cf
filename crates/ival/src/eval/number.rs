use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use malachite::num::float::NiceFloat;
use memoize::memoize;

use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::interval::Interval;

use super::{EvalResult, default_binary, interval, mismatch, not_implemented};

const MAX_FINITE_FACTORIAL: u64 = 170;

#[memoize]
fn integer_factorial(n: u64) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

fn factorial(val: f64) -> f64 {
    if val.fract() == 0.0 && val >= 0.0 {
        if val > MAX_FINITE_FACTORIAL as f64 {
            f64::INFINITY
        } else {
            integer_factorial(val as u64)
        }
    } else {
        let (mut n, mut r) = (val, 1.0);
        while n > 1.0 {
            r *= n;
            n -= 1.0;
        }
        r
    }
}

fn identity_hash(val: f64) -> f64 {
    let mut hasher = DefaultHasher::new();
    NiceFloat(val).hash(&mut hasher);
    f64::from(hasher.finish() as u32)
}

pub fn apply_unary(val: f64, op: UnaryOp) -> EvalResult<Node> {
    use UnaryOp::*;
    Ok(Node::number(match op {
        Plus => val,
        Neg => -val,
        Increment => val + 1.0,
        Decrement => val - 1.0,
        Factorial => factorial(val),
        Hash => identity_hash(val),
        Copy => return Err(not_implemented(op, &Node::number(val))),
    }))
}

pub fn apply_binary(val: f64, op: BinaryOp, other: Node) -> EvalResult<Node> {
    use BinaryOp::*;

    let that = match other {
        Node::Number(that) => that.0,
        Node::Interval(x) if matches!(op, Add | Sub | Mul | Div | Eq | Neq) => {
            return interval::apply_binary(&Interval::degenerate(val), op, Node::Interval(x));
        }
        _ if op == Sequence => return default_binary(&Node::number(val), op, other),
        _ => return Err(mismatch(op, &Node::number(val), &other)),
    };

    Ok(match op {
        Add => Node::number(val + that),
        Sub => Node::number(val - that),
        Mul => Node::number(val * that),
        Div => Node::number(val / that),
        Mod => Node::number(val % that),
        Pow => Node::number(val.powf(that)),
        Eq => Node::boolean(val == that),
        Neq => Node::boolean(val != that),
        Lt => Node::boolean(val < that),
        Leq => Node::boolean(val <= that),
        Gt => Node::boolean(val > that),
        Geq => Node::boolean(val >= that),
        Sequence | Assign => return default_binary(&Node::number(val), op, Node::number(that)),
    })
}

use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::interval::Interval;

use super::{EvalResult, default_binary, mismatch, not_implemented};

pub fn apply_unary(x: &Interval, op: UnaryOp) -> EvalResult<Node> {
    use UnaryOp::*;
    Ok(Node::Interval(match op {
        Copy | Plus => *x,
        Neg => -*x,
        Increment => x.shift(1.0),
        Decrement => x.shift(-1.0),
        Factorial | Hash => return Err(not_implemented(op, &Node::Interval(*x))),
    }))
}

pub fn apply_binary(x: &Interval, op: BinaryOp, other: Node) -> EvalResult<Node> {
    use BinaryOp::*;

    // the right side of `;` is returned as evaluated, never promoted
    if op == Sequence {
        return default_binary(&Node::Interval(*x), op, other);
    }

    if op == Pow {
        return match other {
            Node::Number(power) => Ok(x.pow(power.0)?.into()),
            _ => Err(mismatch(op, &Node::Interval(*x), &other)),
        };
    }

    let that = match other {
        Node::Interval(that) => that,
        Node::Number(point) => Interval::degenerate(point.0),
        _ => return default_binary(&Node::Interval(*x), op, other),
    };

    Ok(match op {
        Add => (*x + that).into(),
        Sub => (*x - that).into(),
        Mul => (*x * that).into(),
        Div => x.checked_div(&that)?.into(),
        Eq => Node::boolean(*x == that),
        Neq => Node::boolean(*x != that),
        _ => return default_binary(&Node::Interval(*x), op, that.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::SemanticError;
    use crate::interval::IntervalError;

    fn interval(node: EvalResult<Node>) -> Interval {
        node.unwrap().as_interval().unwrap()
    }

    #[test]
    fn copy_and_negate() {
        let x = Interval::new(1.0, 2.0);
        assert_eq!(interval(apply_unary(&x, UnaryOp::Copy)), x);
        assert_eq!(interval(apply_unary(&x, UnaryOp::Neg)), Interval::new(-2.0, -1.0));
        assert_eq!(interval(apply_unary(&x, UnaryOp::Increment)), Interval::new(2.0, 3.0));
        assert!(apply_unary(&x, UnaryOp::Factorial).is_err());
    }

    #[test]
    fn addition() {
        let x = Interval::new(1.0, 2.0);
        assert_eq!(
            interval(apply_binary(&x, BinaryOp::Add, x.into())),
            Interval::new(2.0, 4.0)
        );
        assert_eq!(
            interval(apply_binary(&x, BinaryOp::Sub, Node::number(1.0))),
            Interval::new(0.0, 1.0)
        );
    }

    #[test]
    fn division_by_straddling_interval() {
        let x = Interval::new(-1.0, 1.0);
        assert_eq!(
            apply_binary(&x, BinaryOp::Div, x.into()),
            Err(SemanticError::Interval(IntervalError::ContainsZero { divisor: x }))
        );
    }

    #[test]
    fn power_needs_a_number() {
        let x = Interval::new(2.0, 3.0);
        assert_eq!(
            interval(apply_binary(&x, BinaryOp::Pow, Node::number(2.0))),
            Interval::new(4.0, 9.0)
        );
        assert!(apply_binary(&x, BinaryOp::Pow, x.into()).is_err());
    }

    #[test]
    fn comparisons_and_sequence() {
        let x = Interval::new(2.0, 3.0);
        assert_eq!(apply_binary(&x, BinaryOp::Eq, x.into()), Ok(Node::ONE));
        assert_eq!(apply_binary(&x, BinaryOp::Neq, x.into()), Ok(Node::ZERO));
        assert!(apply_binary(&x, BinaryOp::Lt, x.into()).is_err());
        assert_eq!(
            apply_binary(&x, BinaryOp::Sequence, Node::number(5.0)),
            Ok(Node::number(5.0))
        );
    }

    #[test]
    fn numbers_compare_as_points() {
        let point = Interval::degenerate(2.0);
        assert_eq!(apply_binary(&point, BinaryOp::Eq, Node::number(2.0)), Ok(Node::ONE));
        assert_eq!(apply_binary(&point, BinaryOp::Neq, Node::number(2.0)), Ok(Node::ZERO));
    }
}

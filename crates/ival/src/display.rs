use std::fmt::{self, Display};

use itertools::Itertools;

use crate::ast::{Function, Node};
use crate::interval::Interval;

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.inf(), self.sup())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fun {}({}) is {} end",
            self.head.name(),
            self.params.iter().map(|p| p.name()).join(", "),
            self.body
        )
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Node::*;
        match self {
            Number(val) => write!(f, "{}", val.0),
            Interval(x) => write!(f, "{x}"),
            Symbol(sym) => write!(f, "{}", sym.name()),
            Unary { op, operand } => write!(f, "({op} {operand})"),
            Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Branch {
                condition,
                then,
                otherwise,
            } => write!(f, "if {condition} then {then} else {otherwise} end"),
            Composite {
                head,
                args,
                bracket,
            } => {
                let (open, close) = bracket.symbols();
                write!(f, "{}{open}{}{close}", head.name(), args.iter().join(", "))
            }
            Function(func) => write!(f, "{func}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Bracket, Interner, UnaryOp};

    #[test]
    fn display_nodes() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let f = interner.intern("f");

        let sum = Node::binary(BinaryOp::Add, Node::Symbol(x.clone()), Node::number(1.5));
        assert_eq!(sum.to_string(), "(x + 1.5)");
        assert_eq!(
            Node::unary(UnaryOp::Factorial, Node::number(3.0)).to_string(),
            "(! 3)"
        );

        let call = Node::Composite {
            head: f.clone(),
            args: vec![Node::number(1.0), Node::number(2.0)],
            bracket: Bracket::Curly,
        };
        assert_eq!(call.to_string(), "f{1, 2}");

        let func = Node::function(f, vec![x], sum);
        assert_eq!(func.to_string(), "fun f(x) is (x + 1.5) end");
        assert_eq!(Interval::new(2.0, -1.0).to_string(), "[-1, 2]");
    }
}

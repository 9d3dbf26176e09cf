use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::context::Context;

mod call;
mod error;
mod functions;
mod interval;
mod number;

pub use error::{EvalResult, SemanticError};
pub use functions::IntervalFn;

impl Node {
    /// Evaluates in `ctx`. Numbers, intervals and functions already being
    /// values, only symbols, operations, branches and composites do work.
    pub fn evaluate(&self, ctx: &mut Context<'_>) -> EvalResult<Node> {
        use Node::*;
        match self {
            Number(_) | Interval(_) => Ok(self.clone()),
            Symbol(sym) => ctx
                .get(sym)
                .cloned()
                .ok_or_else(|| SemanticError::UndefinedVariable(sym.name().to_owned())),
            Unary { op, operand } => operand.evaluate(ctx)?.apply_unary(*op),
            Binary { op, left, right } => {
                // the target of an assignment is not looked up
                let left = if *op == BinaryOp::Assign {
                    (**left).clone()
                } else {
                    left.evaluate(ctx)?
                };
                let right = right.evaluate(ctx)?;
                left.apply_binary(*op, right, ctx)
            }
            Branch {
                condition,
                then,
                otherwise,
            } => {
                if condition.evaluate(ctx)?.is_true() {
                    then.evaluate(ctx)
                } else {
                    otherwise.evaluate(ctx)
                }
            }
            Composite {
                head,
                args,
                bracket,
            } => call::eval_composite(head, args, *bracket, ctx),
            Function(func) => Ok(ctx.set(func.head.clone(), self.clone())),
        }
    }

    pub fn apply_unary(&self, op: UnaryOp) -> EvalResult<Node> {
        match self {
            Node::Number(val) => number::apply_unary(val.0, op),
            Node::Interval(x) => interval::apply_unary(x, op),
            _ => Err(not_implemented(op, self)),
        }
    }

    pub fn apply_binary(
        &self,
        op: BinaryOp,
        other: Node,
        ctx: &mut Context<'_>,
    ) -> EvalResult<Node> {
        match self {
            Node::Number(val) => number::apply_binary(val.0, op, other),
            Node::Interval(x) => interval::apply_binary(x, op, other),
            Node::Symbol(sym) if op == BinaryOp::Assign => Ok(ctx.set(sym.clone(), other)),
            _ => default_binary(self, op, other),
        }
    }
}

/// What every node does with a binary operator it has no rule for.
fn default_binary(left: &Node, op: BinaryOp, right: Node) -> EvalResult<Node> {
    if op == BinaryOp::Sequence {
        Ok(right)
    } else {
        Err(not_implemented(op, left))
    }
}

fn not_implemented(op: impl ToString, node: &Node) -> SemanticError {
    SemanticError::NotImplemented {
        op: op.to_string(),
        operand: node.kind_name(),
    }
}

fn mismatch(op: BinaryOp, left: &Node, right: &Node) -> SemanticError {
    SemanticError::OperandMismatch {
        op: op.to_string(),
        left: left.kind_name(),
        right: right.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Interner;

    #[test]
    fn assignment_binds_in_current_frame() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let mut ctx = Context::new();

        let assign = Node::binary(BinaryOp::Assign, Node::Symbol(x.clone()), Node::number(4.0));
        assert_eq!(assign.evaluate(&mut ctx), Ok(Node::number(4.0)));
        assert_eq!(Node::Symbol(x).evaluate(&mut ctx), Ok(Node::number(4.0)));
    }

    #[test]
    fn undefined_variable() {
        let mut interner = Interner::new();
        let y = interner.intern("y");
        let mut ctx = Context::new();
        assert_eq!(
            Node::Symbol(y).evaluate(&mut ctx),
            Err(SemanticError::UndefinedVariable("y".to_owned()))
        );
    }

    #[test]
    fn branch_short_circuits() {
        let mut interner = Interner::new();
        let missing = Node::Symbol(interner.intern("missing"));
        let mut ctx = Context::new();

        let taken = Node::branch(Node::ONE, Node::number(7.0), missing.clone());
        assert_eq!(taken.evaluate(&mut ctx), Ok(Node::number(7.0)));

        let other = Node::branch(Node::ZERO, missing, Node::number(8.0));
        assert_eq!(other.evaluate(&mut ctx), Ok(Node::number(8.0)));
    }

    #[test]
    fn sequence_is_the_only_default() {
        let mut interner = Interner::new();
        let f = interner.intern("f");
        let func = Node::function(f, vec![], Node::ONE);
        let mut ctx = Context::new();

        assert_eq!(
            func.apply_binary(BinaryOp::Sequence, Node::number(2.0), &mut ctx),
            Ok(Node::number(2.0))
        );
        assert!(matches!(
            func.apply_binary(BinaryOp::Add, Node::number(2.0), &mut ctx),
            Err(SemanticError::NotImplemented { .. })
        ));
        assert!(matches!(
            func.apply_unary(UnaryOp::Neg),
            Err(SemanticError::NotImplemented { .. })
        ));
    }

    #[test]
    fn function_definition_binds_itself() {
        let mut interner = Interner::new();
        let g = interner.intern("g");
        let func = Node::function(g.clone(), vec![], Node::ONE);
        let mut ctx = Context::new();
        assert_eq!(func.evaluate(&mut ctx), Ok(func.clone()));
        assert_eq!(ctx.get(&g), Some(&func));
    }
}

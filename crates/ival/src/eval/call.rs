use itertools::Itertools;
use log::trace;

use crate::ast::{Bracket, Node, Symbol};
use crate::context::Context;
use crate::interval::Interval;

use super::{EvalResult, IntervalFn, SemanticError};

pub fn eval_composite(
    head: &Symbol,
    args: &[Node],
    bracket: Bracket,
    ctx: &mut Context<'_>,
) -> EvalResult<Node> {
    match bracket {
        Bracket::Curly => construct_interval(head, args, ctx),
        // no indexing semantics are defined, so `f[..]` is a call like `f(..)`
        Bracket::Square | Bracket::Round => call(head, args, ctx),
    }
}

/// `A{lo, hi}` fetches `A` if it is already an interval, otherwise builds one
/// from the two bounds and binds it.
fn construct_interval(head: &Symbol, args: &[Node], ctx: &mut Context<'_>) -> EvalResult<Node> {
    if let Some(existing @ Node::Interval(_)) = ctx.get(head) {
        return Ok(existing.clone());
    }

    let [lo, hi] = args else {
        return Err(SemanticError::ArgumentMismatch {
            name: head.name().to_owned(),
            expected: 2,
            got: args.len(),
        });
    };

    let lo = bound(head, lo, ctx)?;
    let hi = bound(head, hi, ctx)?;

    Ok(ctx.set(head.clone(), Interval::new(lo, hi).into()))
}

fn bound(head: &Symbol, node: &Node, ctx: &mut Context<'_>) -> EvalResult<f64> {
    let val = node.evaluate(ctx)?;
    val.as_number().ok_or_else(|| SemanticError::NonNumericBound {
        name: head.name().to_owned(),
        got: val.kind_name(),
    })
}

fn call(head: &Symbol, args: &[Node], ctx: &mut Context<'_>) -> EvalResult<Node> {
    let func = match ctx.get(head) {
        Some(Node::Function(func)) => func.clone(),
        Some(_) => return Err(SemanticError::NotAFunction(head.name().to_owned())),
        None => {
            let Ok(builtin) = head.name().parse::<IntervalFn>() else {
                return Err(SemanticError::UndefinedVariable(head.name().to_owned()));
            };
            let vals = args.iter().map(|arg| arg.evaluate(ctx)).collect::<EvalResult<Vec<_>>>()?;
            return builtin.call(vals);
        }
    };

    if func.params.len() != args.len() {
        return Err(SemanticError::ArgumentMismatch {
            name: head.name().to_owned(),
            expected: func.params.len(),
            got: args.len(),
        });
    }

    // arguments see the caller's bindings, not each other
    let vals = args.iter().map(|arg| arg.evaluate(ctx)).collect::<EvalResult<Vec<_>>>()?;

    let mut frame = ctx.child();
    for (param, val) in func.params.iter().zip_eq(vals) {
        frame.set(param.clone(), val);
    }
    trace!("enter {} at depth {}", head.name(), frame.depth());
    let result = func.body.evaluate(&mut frame);
    trace!("leave {} at depth {}", head.name(), frame.depth());
    result
}

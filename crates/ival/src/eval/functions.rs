use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::ast::Node;
use crate::interval::{self, Interval};

use super::{EvalResult, SemanticError};

/// Functions over intervals that are callable by name unless the name is
/// bound to something else.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum IntervalFn {
    Sin,
    Cos,
    Tan,
    Cot,
    Asin,
    Log,
    Log10,
    Exp,
    Hull,
    Width,
    Mid,
    Mag,
    Mig,
    Inf,
    Sup,
}

impl IntervalFn {
    pub fn arity(self) -> usize {
        match self {
            Self::Hull => 2,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn call(self, args: Vec<Node>) -> EvalResult<Node> {
        if args.len() != self.arity() {
            return Err(SemanticError::ArgumentMismatch {
                name: self.to_string(),
                expected: self.arity(),
                got: args.len(),
            });
        }
        let xs = args
            .iter()
            .map(|arg| self.operand(arg))
            .collect::<EvalResult<Vec<_>>>()?;
        let x = &xs[0];

        use IntervalFn::*;
        Ok(match self {
            Sin => interval::sin(x).into(),
            Cos => interval::cos(x).into(),
            Tan => interval::tan(x).into(),
            Cot => interval::cot(x).into(),
            Asin => interval::asin(x)?.into(),
            Log => interval::log(x)?.into(),
            Log10 => interval::log10(x)?.into(),
            Exp => interval::exp(x).into(),
            Hull => x.hull(&xs[1]).into(),
            Width => x.width().into(),
            Mid => x.midpoint().into(),
            Mag => x.magnitude().into(),
            Mig => x.mignitude().into(),
            Inf => x.inf().into(),
            Sup => x.sup().into(),
        })
    }

    fn operand(self, arg: &Node) -> EvalResult<Interval> {
        match arg {
            Node::Interval(x) => Ok(*x),
            Node::Number(val) => Ok(Interval::degenerate(val.0)),
            _ => Err(SemanticError::NonIntervalArgument {
                function: self.name(),
                got: arg.kind_name(),
            }),
        }
    }
}

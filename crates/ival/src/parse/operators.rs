use log::debug;
use ordermap::OrderMap;
use strum::Display;

use crate::ast::{BinaryOp, Bracket, Symbol, UnaryOp};
use crate::lex::{Vocabulary, is_identifier};

/// Binding power.
pub type Power = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Fixity {
    Prefix,
    Infix,
}

/// What an operator does when it starts an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefixRule {
    /// `op operand`, the operand extending as far as `power` allows.
    Unary { power: Power, op: UnaryOp },
    /// A declared prefix operator, building `head(operand)`.
    Apply { power: Power, head: Symbol },
    /// `( expr )`
    Group { close: &'static str },
    /// `if cond then a else b end`
    Branch,
    /// `fun f(x, y) is body end`
    Function,
    /// `prefix name power` or `infix name power`
    Declare(Fixity),
}

/// What an operator does when it follows a complete left operand.
#[derive(Debug, Clone, PartialEq)]
pub enum InfixRule {
    Binary { op: BinaryOp, right_assoc: bool },
    Postfix { op: UnaryOp },
    /// A declared infix operator, building `head(left, right)`.
    Apply { head: Symbol },
    /// `head(a, b, ...)` and its square and curly counterparts.
    Composite { close: &'static str, bracket: Bracket },
    /// `a if cond else b`
    Branch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub name: String,
    /// Left binding power, how strongly the operator pulls on what precedes it.
    pub lbp: Power,
    pub prefix: Option<PrefixRule>,
    pub infix: Option<InfixRule>,
}

impl Operator {
    /// An operator with no rules, such as a closing bracket or keyword.
    pub fn closer(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            lbp: 0,
            prefix: None,
            infix: None,
        }
    }

    pub fn prefix(name: &str, rule: PrefixRule) -> Self {
        Self {
            prefix: Some(rule),
            ..Self::closer(name)
        }
    }

    pub fn infix(name: &str, lbp: Power, rule: InfixRule) -> Self {
        Self {
            lbp,
            infix: Some(rule),
            ..Self::closer(name)
        }
    }

    pub fn with_prefix(mut self, rule: PrefixRule) -> Self {
        self.prefix = Some(rule);
        self
    }

    fn binary(name: &str, lbp: Power, op: BinaryOp) -> Self {
        Self::infix(name, lbp, InfixRule::Binary { op, right_assoc: false })
    }

    fn right_binary(name: &str, lbp: Power, op: BinaryOp) -> Self {
        Self::infix(name, lbp, InfixRule::Binary { op, right_assoc: true })
    }

    fn unary(name: &str, power: Power, op: UnaryOp) -> Self {
        Self::prefix(name, PrefixRule::Unary { power, op })
    }

    fn outfix(open: &'static str, close: &'static str, bracket: Bracket) -> Self {
        Self::infix(open, 200, InfixRule::Composite { close, bracket })
            .with_prefix(PrefixRule::Group { close })
    }

    fn postfix(name: &str, lbp: Power, op: UnaryOp) -> Self {
        Self::infix(name, lbp, InfixRule::Postfix { op })
    }

    fn with_unary(self, power: Power, op: UnaryOp) -> Self {
        self.with_prefix(PrefixRule::Unary { power, op })
    }

    pub fn fixity(&self) -> Option<Fixity> {
        match (&self.prefix, &self.infix) {
            (_, Some(_)) => Some(Fixity::Infix),
            (Some(_), None) => Some(Fixity::Prefix),
            (None, None) => None,
        }
    }
}

/// The live grammar. Entries are keyed by their source text.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    operators: OrderMap<String, Operator>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        use BinaryOp as B;
        use UnaryOp as U;

        let mut table = Self::new();
        let entries = [
            Operator::binary(";", 10, B::Sequence),
            Operator::right_binary("=", 20, B::Assign).with_unary(80, U::Copy),
            Operator::prefix("fun", PrefixRule::Function),
            Operator::infix("if", 30, InfixRule::Branch).with_prefix(PrefixRule::Branch),
            Operator::binary("==", 40, B::Eq),
            Operator::binary("!=", 40, B::Neq),
            Operator::binary("<", 40, B::Lt),
            Operator::binary("<=", 40, B::Leq),
            Operator::binary(">", 40, B::Gt),
            Operator::binary(">=", 40, B::Geq),
            Operator::binary("+", 50, B::Add).with_unary(100, U::Plus),
            Operator::binary("-", 50, B::Sub).with_unary(100, U::Neg),
            Operator::binary("*", 60, B::Mul),
            Operator::binary("/", 60, B::Div),
            Operator::binary("%", 60, B::Mod),
            Operator::right_binary("^", 70, B::Pow),
            Operator::postfix("++", 80, U::Increment).with_unary(80, U::Increment),
            Operator::postfix("--", 80, U::Decrement).with_unary(80, U::Decrement),
            Operator::postfix("!", 80, U::Factorial),
            Operator::unary("@", 80, U::Hash),
            Operator::prefix("prefix", PrefixRule::Declare(Fixity::Prefix)),
            Operator::prefix("infix", PrefixRule::Declare(Fixity::Infix)),
            Operator::outfix("(", ")", Bracket::Round),
            Operator::outfix("[", "]", Bracket::Square),
            Operator::outfix("{", "}", Bracket::Curly),
        ];
        for op in entries {
            table.insert(op);
        }
        for closer in [")", "]", "}", ",", "then", "else", "end", "is"] {
            table.insert(Operator::closer(closer));
        }
        table
    }

    fn insert(&mut self, op: Operator) -> Option<Operator> {
        self.operators.insert(op.name.clone(), op)
    }

    /// Adds `op`, replacing any operator of the same name. Nodes that were
    /// already built with the old definition are unaffected.
    pub fn register(&mut self, op: Operator) -> Option<Operator> {
        debug!("registering operator '{}' with binding power {}", op.name, op.lbp);
        let old = self.insert(op);
        if let Some(old) = &old {
            debug!("operator '{}' shadows an earlier definition", old.name);
        }
        old
    }

    pub fn get(&self, name: &str) -> Option<&Operator> {
        self.operators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.values()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Vocabulary for OperatorTable {
    fn is_operator(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn longest_symbol<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.operators
            .keys()
            .filter(|name| text.starts_with(name.as_str()) && !is_identifier(name))
            .map(String::len)
            .max()
            .map(|len| &text[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Interner;

    #[test]
    fn longest_symbol() {
        let table = OperatorTable::standard();
        assert_eq!(table.longest_symbol("!=3"), Some("!="));
        assert_eq!(table.longest_symbol("!3"), Some("!"));
        assert_eq!(table.longest_symbol("++x"), Some("++"));
        assert_eq!(table.longest_symbol("iffy"), None);
        assert_eq!(table.longest_symbol("$"), None);
    }

    #[test]
    fn standard_powers() {
        let table = OperatorTable::standard();
        let lbp = |name| table.get(name).map(|op| op.lbp);
        assert_eq!(lbp("*"), Some(60));
        assert_eq!(lbp("then"), Some(0));
        assert_eq!(
            table.get("^").and_then(|op| op.infix.clone()),
            Some(InfixRule::Binary {
                op: BinaryOp::Pow,
                right_assoc: true,
            })
        );
        assert_eq!(table.get("@").and_then(Operator::fixity), Some(Fixity::Prefix));
        assert_eq!(table.get(")").and_then(Operator::fixity), None);
    }

    #[test]
    fn registering_shadows() {
        let mut interner = Interner::new();
        let head = interner.intern("-");
        let mut table = OperatorTable::standard();
        let before = table.len();

        let old = table.register(Operator::infix("-", 5, InfixRule::Apply { head: head.clone() }));
        assert_eq!(old.map(|op| op.lbp), Some(50));
        assert_eq!(table.len(), before);
        assert_eq!(table.get("-").map(|op| op.lbp), Some(5));
        assert_eq!(table.get("-").and_then(|op| op.prefix.clone()), None);
    }
}

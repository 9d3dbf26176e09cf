//! `prefix name power` and `infix name power`.
//!
//! A declaration registers a new operator in the live table while the
//! surrounding program is still being parsed. The operator builds a round
//! composite headed by `name`, so `a name b` means `name(a, b)`.

use log::debug;

use crate::ast::Node;
use crate::lex::{Position, TokenKind, is_identifier};

use super::{
    Fixity, InfixRule, Operator, ParseResult, Power, PrefixRule, Session, SyntaxError,
    SyntaxErrorKind,
};

/// Binds tighter than anything in the standard grammar, so the power is a
/// single operand.
const POWER_BP: Power = 1000;

fn is_power(val: f64) -> bool {
    val >= 0.0 && val.fract() == 0.0 && val <= f64::from(Power::MAX)
}

impl Session<'_, '_> {
    pub(super) fn declare(&mut self, fixity: Fixity) -> ParseResult<Node> {
        let token = self.next(Position::Operand)?;
        let name = match token.kind {
            TokenKind::Literal(Node::Symbol(sym)) => sym.name().to_owned(),
            // redeclaring a keyword-like operator
            TokenKind::Operator(name) if is_identifier(&name) => name,
            found => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::InvalidOperand {
                        role: "an operator name",
                        found: found.to_string(),
                    },
                    token.location,
                ));
            }
        };

        let location = self.peek(Position::Operand)?.location;
        let power = match self.expression(POWER_BP)? {
            Node::Number(p) if is_power(p.0) => p.0 as Power,
            other => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::InvalidPower(other.to_string()),
                    location,
                ));
            }
        };

        let head = self.interner.intern(&name);
        let op = match fixity {
            Fixity::Prefix => Operator::prefix(&name, PrefixRule::Apply { power, head }),
            Fixity::Infix => Operator::infix(&name, power, InfixRule::Apply { head }),
        };
        debug!("declared {fixity} operator '{name}'");
        self.operators.register(op);

        // the buffered token may spell the new operator
        self.invalidate();
        Ok(Node::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Bracket, Interner, Node};
    use crate::parse::{Parser, SyntaxErrorKind};

    #[test]
    fn declared_infix_builds_composites() {
        let mut parser = Parser::default();
        let mut interner = Interner::new();

        assert_eq!(parser.parse("infix orr 10", &mut interner), Ok(Node::ZERO));
        let node = parser.parse("A orr B", &mut interner).unwrap();
        let Node::Composite { head, args, bracket } = node else {
            panic!("expected a composite");
        };
        assert_eq!(head.name(), "orr");
        assert_eq!(args.len(), 2);
        assert_eq!(bracket, Bracket::Round);
    }

    #[test]
    fn declaration_applies_to_the_rest_of_the_source() {
        let mut parser = Parser::default();
        let mut interner = Interner::new();
        let node = parser.parse("prefix twice 90; twice 3 + 1", &mut interner).unwrap();
        assert_eq!(node.to_string(), "(0 ; (twice(3) + 1))");
    }

    #[test]
    fn declared_power_orders_operators() {
        let mut parser = Parser::default();
        let mut interner = Interner::new();
        parser.parse("infix dot 55", &mut interner).unwrap();
        assert_eq!(
            parser.parse("a + b dot c * d", &mut interner).unwrap().to_string(),
            "(a + dot(b, (c * d)))"
        );
    }

    #[test]
    fn redeclaring_shadows() {
        let mut parser = Parser::default();
        let mut interner = Interner::new();
        parser.parse("infix orr 10", &mut interner).unwrap();
        parser.parse("prefix orr 90", &mut interner).unwrap();
        assert_eq!(parser.parse("orr x", &mut interner).unwrap().to_string(), "orr(x)");
        assert!(parser.parse("x orr y", &mut interner).is_err());
    }

    #[test]
    fn bad_declarations() {
        let mut parser = Parser::default();
        let mut interner = Interner::new();
        let mut kind = |src| parser.parse(src, &mut interner).unwrap_err().kind;
        assert!(matches!(kind("infix 3 4"), SyntaxErrorKind::InvalidOperand { .. }));
        assert_eq!(kind("infix orr x"), SyntaxErrorKind::InvalidPower("x".to_owned()));
        assert_eq!(kind("infix orr 1.5"), SyntaxErrorKind::InvalidPower("1.5".to_owned()));
        assert_eq!(kind("prefix orr -2"), SyntaxErrorKind::InvalidPower("-2".to_owned()));
    }
}

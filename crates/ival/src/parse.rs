//! Top-down operator precedence parsing over a mutable grammar.
//!
//! Every operator is an entry in an [`OperatorTable`] carrying a left binding
//! power and rules for the prefix and infix positions. `expression(rbp)`
//! parses one prefix form and then keeps extending it with infix forms for as
//! long as the next operator binds tighter than `rbp`.
//!
//! The table belongs to the [`Parser`] and outlives each call to
//! [`Parser::parse`], so operators declared with `prefix`/`infix` stay
//! available to everything parsed afterwards.

use crate::ast::{BinaryOp, Bracket, Interner, Node};
use crate::lex::{Cursor, Lexer, Location, Position, ScanContext, Token, TokenKind};

mod declare;
mod error;
mod operators;

pub use error::{ParseResult, SyntaxError, SyntaxErrorKind};
pub use operators::{Fixity, InfixRule, Operator, OperatorTable, Power, PrefixRule};

#[derive(Debug, Clone)]
pub struct Parser {
    lexer: Lexer,
    operators: OperatorTable,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Lexer::standard(), OperatorTable::standard())
    }
}

impl Parser {
    pub fn new(lexer: Lexer, operators: OperatorTable) -> Self {
        Self { lexer, operators }
    }

    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn operators_mut(&mut self) -> &mut OperatorTable {
        &mut self.operators
    }

    /// Parses all of `src` into one tree. Symbols are interned in `interner`.
    pub fn parse(&mut self, src: &str, interner: &mut Interner) -> ParseResult<Node> {
        let mut session = Session {
            lexer: &self.lexer,
            operators: &mut self.operators,
            interner,
            cursor: Cursor::new(src),
            lookahead: None,
        };
        let node = session.expression(0)?;
        let token = session.next(Position::Operator)?;
        if token.kind != TokenKind::End {
            return Err(unexpected(&token));
        }
        Ok(node)
    }
}

fn unexpected(token: &Token) -> SyntaxError {
    let kind = match &token.kind {
        TokenKind::End => SyntaxErrorKind::UnexpectedEnd,
        kind => SyntaxErrorKind::UnexpectedToken(kind.to_string()),
    };
    SyntaxError::new(kind, token.location)
}

fn invalid_operand(role: &'static str, node: &Node, location: Location) -> SyntaxError {
    SyntaxError::new(
        SyntaxErrorKind::InvalidOperand {
            role,
            found: node.to_string(),
        },
        location,
    )
}

/// State of one call to [`Parser::parse`].
struct Session<'p, 's> {
    lexer: &'p Lexer,
    operators: &'p mut OperatorTable,
    interner: &'p mut Interner,
    cursor: Cursor<'s>,
    /// One buffered token and the position it was lexed for.
    lookahead: Option<(Position, Token)>,
}

impl Session<'_, '_> {
    fn lex(&mut self, position: Position) -> ParseResult<Token> {
        let mut ctx = ScanContext {
            position,
            vocabulary: &*self.operators,
            interner: &mut *self.interner,
        };
        self.lexer.next_token(&mut self.cursor, &mut ctx)
    }

    /// Drops the buffered token so that it is lexed again, for instance
    /// after the grammar changed.
    fn invalidate(&mut self) {
        if let Some((_, token)) = self.lookahead.take() {
            self.cursor.reset(token.location);
        }
    }

    fn next(&mut self, position: Position) -> ParseResult<Token> {
        if self.lookahead.as_ref().is_some_and(|(buffered, _)| *buffered != position) {
            self.invalidate();
        }
        match self.lookahead.take() {
            Some((_, token)) => Ok(token),
            None => self.lex(position),
        }
    }

    fn peek(&mut self, position: Position) -> ParseResult<&Token> {
        let token = self.next(position)?;
        Ok(&self.lookahead.insert((position, token)).1)
    }

    fn advance_if(&mut self, name: &str) -> ParseResult<bool> {
        let found = matches!(
            &self.peek(Position::Operator)?.kind,
            TokenKind::Operator(op) if op == name
        );
        if found {
            self.lookahead = None;
        }
        Ok(found)
    }

    fn expect(&mut self, name: &str) -> ParseResult<()> {
        let token = self.next(Position::Operator)?;
        match &token.kind {
            TokenKind::Operator(op) if op == name => Ok(()),
            found => Err(SyntaxError::new(
                SyntaxErrorKind::Expected {
                    expected: name.to_owned(),
                    found: found.to_string(),
                },
                token.location,
            )),
        }
    }

    fn left_binding_power(&mut self) -> ParseResult<Power> {
        let name = match &self.peek(Position::Operator)?.kind {
            TokenKind::Operator(name) => name.clone(),
            _ => return Ok(0),
        };
        Ok(self.operators.get(&name).map_or(0, |op| op.lbp))
    }

    fn expression(&mut self, rbp: Power) -> ParseResult<Node> {
        let token = self.next(Position::Operand)?;
        let mut left = self.nud(token)?;
        while self.left_binding_power()? > rbp {
            let token = self.next(Position::Operator)?;
            left = self.led(token, left)?;
        }
        Ok(left)
    }

    fn nud(&mut self, token: Token) -> ParseResult<Node> {
        let name = match &token.kind {
            TokenKind::Literal(node) => return Ok(node.clone()),
            TokenKind::Operator(name) => name,
            TokenKind::End => return Err(unexpected(&token)),
        };
        let Some(rule) = self.operators.get(name).and_then(|op| op.prefix.clone()) else {
            return Err(unexpected(&token));
        };

        match rule {
            PrefixRule::Unary { power, op } => Ok(Node::unary(op, self.expression(power)?)),
            PrefixRule::Apply { power, head } => Ok(Node::Composite {
                head,
                args: vec![self.expression(power)?],
                bracket: Bracket::Round,
            }),
            PrefixRule::Group { close } => {
                let inner = self.expression(0)?;
                self.expect(close)?;
                Ok(inner)
            }
            PrefixRule::Branch => {
                let condition = self.expression(0)?;
                self.expect("then")?;
                let then = self.expression(0)?;
                self.expect("else")?;
                let otherwise = self.expression(0)?;
                self.expect("end")?;
                Ok(Node::branch(condition, then, otherwise))
            }
            PrefixRule::Function => self.function(token.location),
            PrefixRule::Declare(fixity) => self.declare(fixity),
        }
    }

    fn led(&mut self, token: Token, left: Node) -> ParseResult<Node> {
        let TokenKind::Operator(name) = &token.kind else {
            return Err(unexpected(&token));
        };
        let Some((lbp, rule)) = self
            .operators
            .get(name)
            .and_then(|op| Some((op.lbp, op.infix.clone()?)))
        else {
            return Err(unexpected(&token));
        };

        match rule {
            InfixRule::Binary { op, right_assoc } => {
                // a trailing `;` ends the program
                if op == BinaryOp::Sequence
                    && self.peek(Position::Operand)?.kind == TokenKind::End
                {
                    return Ok(left);
                }
                let rbp = if right_assoc { lbp.saturating_sub(1) } else { lbp };
                Ok(Node::binary(op, left, self.expression(rbp)?))
            }
            InfixRule::Postfix { op } => Ok(Node::unary(op, left)),
            InfixRule::Apply { head } => Ok(Node::Composite {
                head,
                args: vec![left, self.expression(lbp)?],
                bracket: Bracket::Round,
            }),
            InfixRule::Composite { close, bracket } => {
                let head = match left {
                    Node::Symbol(head) => head,
                    other => {
                        return Err(invalid_operand(
                            "the head of a composite",
                            &other,
                            token.location,
                        ));
                    }
                };
                let mut args = Vec::new();
                if !self.advance_if(close)? {
                    loop {
                        args.push(self.expression(0)?);
                        if !self.advance_if(",")? {
                            break;
                        }
                    }
                    self.expect(close)?;
                }
                Ok(Node::Composite { head, args, bracket })
            }
            InfixRule::Branch => {
                let condition = self.expression(0)?;
                self.expect("else")?;
                let otherwise = self.expression(lbp)?;
                Ok(Node::branch(condition, left, otherwise))
            }
        }
    }

    /// `fun f(x, y) is body end`, the signature being parsed as a call.
    fn function(&mut self, location: Location) -> ParseResult<Node> {
        let signature = self.expression(0)?;
        let (head, args) = match signature {
            Node::Composite {
                head,
                args,
                bracket: Bracket::Round,
            } => (head, args),
            other => return Err(invalid_operand("a function signature", &other, location)),
        };
        let params = args
            .into_iter()
            .map(|arg| match arg {
                Node::Symbol(sym) => Ok(sym),
                other => Err(invalid_operand("a parameter", &other, location)),
            })
            .collect::<ParseResult<Vec<_>>>()?;

        self.expect("is")?;
        let body = self.expression(0)?;
        self.expect("end")?;
        Ok(Node::function(head, params, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::UnaryOp;
    use crate::interval::Interval;

    fn parse(src: &str) -> ParseResult<Node> {
        Parser::default().parse(src, &mut Interner::new())
    }

    fn shown(src: &str) -> String {
        parse(src).unwrap().to_string()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(shown("2+3*4"), "(2 + (3 * 4))");
        assert_eq!(shown("2^3^2"), "(2 ^ (3 ^ 2))");
        assert_eq!(shown("8-2-1"), "((8 - 2) - 1)");
        assert_eq!(shown("(2+3)*4"), "((2 + 3) * 4)");
        assert_eq!(shown("a = b = 1"), "(a = (b = 1))");
        assert_eq!(shown("1 < 2 == 1"), "((1 < 2) == 1)");
    }

    #[test]
    fn signs_and_unary_operators() {
        let x = Interner::new().intern("x");
        assert_eq!(
            parse("x-1").unwrap(),
            Node::binary(BinaryOp::Sub, Node::Symbol(x), Node::number(1.0))
        );
        assert_eq!(parse("-1").unwrap(), Node::number(-1.0));
        assert_eq!(shown("- x"), "(- x)");
        assert_eq!(shown("3!"), "(! 3)");
        assert_eq!(shown("x++ * 2"), "((++ x) * 2)");
        assert_eq!(shown("@x != 2"), "((@ x) != 2)");
        assert_eq!(shown("=A"), "(= A)");
    }

    #[test]
    fn composites() {
        assert_eq!(shown("f(1, g(2), 3)"), "f(1, g(2), 3)");
        assert_eq!(shown("f()"), "f()");
        assert_eq!(shown("A{1,2} + v[0]"), "(A{1, 2} + v[0])");
        assert_eq!(parse("I{1,2}").unwrap(), Node::Interval(Interval::new(1.0, 2.0)));
    }

    #[test]
    fn branches_and_functions() {
        assert_eq!(shown("if x then 1 else 2 end"), "if x then 1 else 2 end");
        assert_eq!(shown("y = 1 if x else 2"), "(y = if x then 1 else 2 end)");
        assert_eq!(
            shown("fun f(a, b) is a * b end; f(2, 3)"),
            "(fun f(a, b) is (a * b) end ; f(2, 3))"
        );
    }

    #[test]
    fn trailing_separator() {
        assert_eq!(shown("x = 1; y = 2;"), "((x = 1) ; (y = 2))");
    }

    #[test]
    fn syntax_errors() {
        let kind = |src| parse(src).unwrap_err().kind;
        assert_eq!(kind(""), SyntaxErrorKind::UnexpectedEnd);
        assert_eq!(
            kind("(1 + 2"),
            SyntaxErrorKind::Expected {
                expected: ")".to_owned(),
                found: "end of input".to_owned(),
            }
        );
        assert_eq!(kind("then"), SyntaxErrorKind::UnexpectedToken("then".to_owned()));
        assert_eq!(kind("1 end"), SyntaxErrorKind::UnexpectedToken("end".to_owned()));
        assert_eq!(
            kind("if 1 then 2 end"),
            SyntaxErrorKind::Expected {
                expected: "else".to_owned(),
                found: "end".to_owned(),
            }
        );
        assert!(matches!(kind("2(3)"), SyntaxErrorKind::InvalidOperand { .. }));
        assert!(matches!(
            kind("fun f(1) is 1 end"),
            SyntaxErrorKind::InvalidOperand { role: "a parameter", .. }
        ));
        assert!(matches!(kind("I{1,2"), SyntaxErrorKind::MalformedInterval(_)));
    }

    #[test]
    fn error_location() {
        let err = parse("1 +\n  * 2").unwrap_err();
        assert_eq!(err.location.line, 2);
        assert_eq!(err.location.column, 3);
    }

    #[test]
    fn unary_node_shape() {
        assert_eq!(
            parse("--2").unwrap(),
            Node::unary(UnaryOp::Decrement, Node::number(2.0))
        );
    }
}

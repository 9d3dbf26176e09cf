//! Tokenizing by prioritized recognizers.
//!
//! A [`Lexer`] is an ordered list of [`Recognizer`]s. At every position each
//! recognizer is tried from the highest level down and the first one that
//! matches produces the token. A recognizer either declines (`Ok(None)`), in
//! which case the cursor is rewound, or fails with a [`SyntaxError`] when the
//! input is definitely malformed.

use std::fmt::{self, Display};

use lazy_regex::regex_is_match;
use log::trace;

use crate::ast::{Interner, Node};
use crate::parse::{ParseResult, SyntaxError, SyntaxErrorKind};

mod cursor;
pub mod literals;

pub use cursor::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Byte offset into the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Name of an entry in the operator table.
    Operator(String),
    Literal(Node),
    End,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(name) => write!(f, "{name}"),
            Self::Literal(node) => write!(f, "{node}"),
            Self::End => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

/// Whether the parser wants the start of an operand or something that
/// follows one. Signed number literals only exist in operand position, so
/// `x-1` is a subtraction while `x = -1` assigns a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Operand,
    Operator,
}

/// The operator names the lexer has to know about.
pub trait Vocabulary {
    fn is_operator(&self, name: &str) -> bool;

    /// The longest non-identifier operator name that `text` starts with.
    fn longest_symbol<'t>(&self, text: &'t str) -> Option<&'t str>;
}

pub struct ScanContext<'a> {
    pub position: Position,
    pub vocabulary: &'a dyn Vocabulary,
    pub interner: &'a mut Interner,
}

pub enum Scanned {
    Token(TokenKind),
    /// Input that separates tokens without being one.
    Trivia,
}

pub type Recognize = fn(&mut Cursor<'_>, &mut ScanContext<'_>) -> ParseResult<Option<Scanned>>;

#[derive(Clone)]
pub struct Recognizer {
    pub name: &'static str,
    pub level: u8,
    pub recognize: Recognize,
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexer {
    recognizers: Vec<Recognizer>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut lexer = Self::new();
        lexer.register("interval", 60, literals::interval);
        lexer.register("name", 50, literals::name);
        lexer.register("number", 20, literals::number);
        lexer.register("operator", 10, literals::operator);
        lexer.register("whitespace", 0, literals::whitespace);
        lexer
    }

    /// Adds a recognizer. Among equal levels the earlier registration wins.
    pub fn register(&mut self, name: &'static str, level: u8, recognize: Recognize) {
        let index = self.recognizers.partition_point(|r| r.level >= level);
        self.recognizers.insert(
            index,
            Recognizer {
                name,
                level,
                recognize,
            },
        );
    }

    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    pub fn next_token(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &mut ScanContext<'_>,
    ) -> ParseResult<Token> {
        'scan: loop {
            let location = cursor.location();
            if cursor.is_at_end() {
                return Ok(Token {
                    kind: TokenKind::End,
                    location,
                });
            }

            for recognizer in &self.recognizers {
                cursor.mark();
                match (recognizer.recognize)(cursor, ctx)? {
                    Some(Scanned::Token(kind)) => {
                        trace!("{} token '{}' at {location}", recognizer.name, cursor.extract());
                        return Ok(Token { kind, location });
                    }
                    Some(Scanned::Trivia) => continue 'scan,
                    None => cursor.reset(location),
                }
            }

            let c = cursor.peek(0).unwrap_or_default();
            return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedCharacter(c), location));
        }
    }
}

pub fn is_identifier(name: &str) -> bool {
    regex_is_match!(r"^[\p{L}_][\p{L}\p{N}_]*$", name)
}

/// Tokenizes all of `src` with every token read in the given position.
pub fn tokenize(
    lexer: &Lexer,
    src: &str,
    position: Position,
    vocabulary: &dyn Vocabulary,
    interner: &mut Interner,
) -> ParseResult<Vec<Token>> {
    let mut cursor = Cursor::new(src);
    let mut ctx = ScanContext {
        position,
        vocabulary,
        interner,
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token(&mut cursor, &mut ctx)?;
        if token.kind == TokenKind::End {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    struct Words(&'static [&'static str]);

    impl Vocabulary for Words {
        fn is_operator(&self, name: &str) -> bool {
            self.0.iter().any(|word| *word == name)
        }

        fn longest_symbol<'t>(&self, text: &'t str) -> Option<&'t str> {
            self.0
                .iter()
                .filter(|name| !is_identifier(name) && text.starts_with(*name))
                .max_by_key(|name| name.len())
                .map(|name| &text[..name.len()])
        }
    }

    const WORDS: Words = Words(&["+", "-", "++", "=", "==", "(", ")", "if", ";"]);

    fn kinds(src: &str, position: Position) -> Vec<TokenKind> {
        let mut interner = Interner::new();
        tokenize(&Lexer::standard(), src, position, &WORDS, &mut interner)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn op(name: &str) -> TokenKind {
        TokenKind::Operator(name.to_owned())
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(kinds("++ == =", Position::Operator), vec![op("++"), op("=="), op("=")]);
    }

    #[test]
    fn names_become_operators_or_symbols() {
        let mut interner = Interner::new();
        let tokens =
            tokenize(&Lexer::standard(), "if x", Position::Operand, &WORDS, &mut interner).unwrap();
        assert_eq!(tokens[0].kind, op("if"));
        let x = interner.lookup("x").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Literal(Node::Symbol(x)));
        assert_eq!(tokens[1].location.column, 4);
    }

    #[test]
    fn sign_depends_on_position() {
        assert_eq!(kinds("-1", Position::Operand), vec![TokenKind::Literal(Node::number(-1.0))]);
        assert_eq!(
            kinds("-1", Position::Operator),
            vec![op("-"), TokenKind::Literal(Node::number(1.0))]
        );
    }

    #[test]
    fn interval_literal_beats_name() {
        assert_eq!(
            kinds("I{1.5,2} Ix", Position::Operand)[0],
            TokenKind::Literal(Node::Interval(Interval::new(1.5, 2.0)))
        );
    }

    #[test]
    fn comments_are_trivia() {
        assert_eq!(
            kinds("1 # one\n+ 2 #", Position::Operator),
            vec![
                TokenKind::Literal(Node::number(1.0)),
                op("+"),
                TokenKind::Literal(Node::number(2.0)),
            ]
        );
    }

    #[test]
    fn unknown_character() {
        let mut interner = Interner::new();
        let err = tokenize(&Lexer::standard(), "1 $", Position::Operand, &WORDS, &mut interner)
            .unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter('$'));
        assert_eq!(err.location.column, 3);
    }

    #[test]
    fn registration_keeps_levels_ordered() {
        let mut lexer = Lexer::standard();
        lexer.register("late", 20, literals::number);
        let levels: Vec<_> = lexer.recognizers().iter().map(|r| (r.name, r.level)).collect();
        assert_eq!(
            levels,
            vec![
                ("interval", 60),
                ("name", 50),
                ("number", 20),
                ("late", 20),
                ("operator", 10),
                ("whitespace", 0),
            ]
        );
    }
}

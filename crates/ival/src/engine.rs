use thiserror::Error;

use crate::ast::{Interner, Node, Symbol};
use crate::context::Context;
use crate::eval::{EvalResult, SemanticError};
use crate::parse::{OperatorTable, ParseResult, Parser, SyntaxError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

/// A parser, its symbol table and the global scope, kept together so that
/// declarations and bindings carry over from one program to the next.
#[derive(Debug, Clone)]
pub struct Engine {
    parser: Parser,
    /// The grammar before any `prefix`/`infix` declaration ran.
    grammar: Parser,
    interner: Interner,
    globals: Context<'static>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_parser(Parser::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine over a customised grammar, such as one with extra
    /// recognizers or operators registered.
    pub fn with_parser(parser: Parser) -> Self {
        Self {
            grammar: parser.clone(),
            parser,
            interner: Interner::new(),
            globals: Context::new(),
        }
    }

    pub fn parse(&mut self, src: &str) -> ParseResult<Node> {
        self.parser.parse(src, &mut self.interner)
    }

    pub fn evaluate(&mut self, node: &Node) -> EvalResult<Node> {
        node.evaluate(&mut self.globals)
    }

    pub fn run(&mut self, src: &str) -> Result<Node, Error> {
        let node = self.parse(src)?;
        Ok(self.evaluate(&node)?)
    }

    /// Binds `name` in the global scope.
    pub fn define(&mut self, name: &str, value: impl Into<Node>) -> Symbol {
        let sym = self.interner.intern(name);
        self.globals.set(sym.clone(), value.into());
        sym
    }

    /// Drops a global binding, returning what it was bound to.
    pub fn forget(&mut self, name: &str) -> Option<Node> {
        let sym = self.interner.lookup(name)?;
        self.globals.remove(&sym)
    }

    pub fn lookup(&self, name: &str) -> Option<&Node> {
        self.interner.lookup(name).and_then(|sym| self.globals.get(&sym))
    }

    pub fn globals(&self) -> &Context<'static> {
        &self.globals
    }

    pub fn operators(&self) -> &OperatorTable {
        self.parser.operators()
    }

    /// Forgets every binding and declared operator, going back to the
    /// grammar the engine was built with.
    pub fn reset(&mut self) {
        *self = Self::with_parser(self.grammar.clone());
    }
}

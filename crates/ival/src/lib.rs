pub mod ast;
pub mod context;
pub mod display;
pub mod engine;
pub mod eval;
pub mod interval;
pub mod lex;
pub mod parse;

pub use ast::Node;
pub use engine::{Engine, Error};
pub use interval::Interval;

//! Kestrel parser: turns source text into an [`Expr`] tree.
//!
//! Parsing is all-or-nothing. The first lexical or syntactic problem is
//! returned as a [`ParseError`] and no partial tree is produced.

pub mod ast;
pub mod error;
mod parser;

use kestrel_lexer::Lexer;

pub use ast::{Expr, ExprKind, Pattern};
pub use error::ParseError;

use parser::Parser;

/// Parse a complete Kestrel program.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = Lexer::lex(source)?;
    Parser::new(tokens, source).parse_program()
}

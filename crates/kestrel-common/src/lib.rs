//! Shared types for the Kestrel compiler: source spans, tokens, and lexer
//! errors.

pub mod error;
pub mod span;
pub mod token;

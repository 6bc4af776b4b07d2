use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A lexer error with location information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The specific kind of lexer error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    UnexpectedCharacter(char),
    /// A block comment (`{- ... -}`) was not closed before end of input.
    UnterminatedBlockComment,
    /// A `-}` with no block comment open.
    UnmatchedBlockCommentClose,
    /// An integer literal does not fit in 64 bits.
    InvalidNumberLiteral(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character: {c:?}"),
            Self::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            Self::UnmatchedBlockCommentClose => {
                write!(f, "unmatched `-}}` with no block comment open")
            }
            Self::InvalidNumberLiteral(s) => write!(f, "invalid number literal: {s}"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::new(LexErrorKind::UnexpectedCharacter('@'), Span::new(0, 1));
        assert_eq!(err.to_string(), "unexpected character: '@'");
    }

    #[test]
    fn lex_error_kind_display() {
        assert_eq!(
            LexErrorKind::UnterminatedBlockComment.to_string(),
            "unterminated block comment"
        );
        assert_eq!(
            LexErrorKind::UnmatchedBlockCommentClose.to_string(),
            "unmatched `-}` with no block comment open"
        );
        assert_eq!(
            LexErrorKind::InvalidNumberLiteral("99999999999999999999".into()).to_string(),
            "invalid number literal: 99999999999999999999"
        );
    }
}

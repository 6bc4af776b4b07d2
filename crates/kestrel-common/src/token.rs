use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A token produced by the Kestrel lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    /// The source text this token covers.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.span.start as usize..self.span.end as usize]
    }
}

/// Every kind of token in Kestrel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // ── Keywords ───────────────────────────────────────────────────────
    Let,
    In,
    Fn,
    If,
    Then,
    Else,
    True,
    False,

    // ── Operators and punctuation ──────────────────────────────────────
    /// `=`
    Eq,
    /// `->`
    Arrow,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,

    // ── Literals and names ─────────────────────────────────────────────
    /// Decimal integer literal, e.g. `42`.
    IntLiteral,
    Ident,

    // ── Trivia ─────────────────────────────────────────────────────────
    /// `-- ...` up to the end of the line.
    Comment,
    /// `{- ... -}`.
    BlockComment,

    // ── Special ────────────────────────────────────────────────────────
    Eof,
    /// Malformed input. The lexer records a matching `LexError`.
    Error,
}

impl TokenKind {
    /// Tokens the parser never sees.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::BlockComment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Let => "`let`",
            TokenKind::In => "`in`",
            TokenKind::Fn => "`fn`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::True => "`True`",
            TokenKind::False => "`False`",
            TokenKind::Eq => "`=`",
            TokenKind::Arrow => "`->`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Comma => "`,`",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::Ident => "identifier",
            TokenKind::Comment | TokenKind::BlockComment => "comment",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "invalid token",
        };
        f.write_str(text)
    }
}

/// Look up a keyword from its spelling. Keywords are case-sensitive.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "let" => Some(TokenKind::Let),
        "in" => Some(TokenKind::In),
        "fn" => Some(TokenKind::Fn),
        "if" => Some(TokenKind::If),
        "then" => Some(TokenKind::Then),
        "else" => Some(TokenKind::Else),
        "True" => Some(TokenKind::True),
        "False" => Some(TokenKind::False),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_recognizes_all_keywords() {
        let keywords = [
            ("let", TokenKind::Let),
            ("in", TokenKind::In),
            ("fn", TokenKind::Fn),
            ("if", TokenKind::If),
            ("then", TokenKind::Then),
            ("else", TokenKind::Else),
            ("True", TokenKind::True),
            ("False", TokenKind::False),
        ];
        for (s, expected) in keywords {
            assert_eq!(keyword_from_str(s), Some(expected), "{s:?}");
        }
    }

    #[test]
    fn keyword_from_str_rejects_non_keywords() {
        assert_eq!(keyword_from_str("foo"), None);
        assert_eq!(keyword_from_str(""), None);
        assert_eq!(keyword_from_str("true"), None);
        assert_eq!(keyword_from_str("LET"), None);
        assert_eq!(keyword_from_str("letx"), None);
    }

    #[test]
    fn token_text_slices_source() {
        let tok = Token::new(TokenKind::Ident, 4, 7);
        assert_eq!(tok.text("let foo = 1"), "foo");
        assert_eq!(tok.span, Span::new(4, 7));
    }

    #[test]
    fn trivia_kinds() {
        assert!(TokenKind::Comment.is_trivia());
        assert!(TokenKind::BlockComment.is_trivia());
        assert!(!TokenKind::Ident.is_trivia());
    }
}

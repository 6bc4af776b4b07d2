// Kestrel lexer -- tokenizer for the Kestrel language.

mod cursor;

use cursor::Cursor;
use kestrel_common::error::{LexError, LexErrorKind};
use kestrel_common::span::Span;
use kestrel_common::token::{keyword_from_str, Token, TokenKind};

/// The Kestrel lexer. Converts source text into a stream of tokens.
///
/// Implements `Iterator<Item = Token>`; the stream always ends with exactly
/// one `Eof` token. Malformed input becomes an `Error` token and a
/// [`LexError`] recorded on the lexer, so lexing never stops early.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    emitted_eof: bool,
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, `Error` tokens included.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Tokenize the entire source, failing on the first malformed token.
    pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let tokens: Vec<Token> = lexer.by_ref().collect();
        match lexer.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(tokens),
        }
    }

    /// Errors recorded so far, in source order.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            '(' => self.single_char_token(TokenKind::LParen, start),
            ')' => self.single_char_token(TokenKind::RParen, start),
            ',' => self.single_char_token(TokenKind::Comma, start),
            '=' => self.single_char_token(TokenKind::Eq, start),
            '-' => self.lex_minus(start),
            '{' if self.cursor.peek_next() == Some('-') => self.lex_block_comment(start),
            '0'..='9' => self.lex_number(start),
            c if is_ident_start(c) => self.lex_ident(start),
            c => {
                self.cursor.advance();
                self.error(LexErrorKind::UnexpectedCharacter(c), start)
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn skip_whitespace(&mut self) {
        self.cursor
            .eat_while(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n');
    }

    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    /// Record an error covering `start..pos` and return the matching `Error` token.
    fn error(&mut self, kind: LexErrorKind, start: u32) -> Token {
        let end = self.cursor.pos();
        self.errors.push(LexError::new(kind, Span::new(start, end)));
        Token::new(TokenKind::Error, start, end)
    }

    /// `->` -> `Arrow`, `--` -> line comment. A lone `-` or a stray `-}` is an
    /// error.
    fn lex_minus(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '-'
        match self.cursor.peek() {
            Some('>') => self.single_char_token(TokenKind::Arrow, start),
            Some('-') => {
                self.cursor.eat_while(|c| c != '\n');
                Token::new(TokenKind::Comment, start, self.cursor.pos())
            }
            Some('}') => {
                self.cursor.advance();
                self.error(LexErrorKind::UnmatchedBlockCommentClose, start)
            }
            _ => self.error(LexErrorKind::UnexpectedCharacter('-'), start),
        }
    }

    /// `{- ... -}`. Block comments do not nest: the first `-}` closes.
    fn lex_block_comment(&mut self, start: u32) -> Token {
        self.cursor.advance(); // '{'
        self.cursor.advance(); // '-'
        loop {
            if self.cursor.at_str("-}") {
                self.cursor.advance();
                self.cursor.advance();
                return Token::new(TokenKind::BlockComment, start, self.cursor.pos());
            }
            if self.cursor.advance().is_none() {
                return self.error(LexErrorKind::UnterminatedBlockComment, start);
            }
        }
    }

    fn lex_number(&mut self, start: u32) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let text = self.cursor.slice(start, self.cursor.pos());
        if text.parse::<i64>().is_err() {
            return self.error(LexErrorKind::InvalidNumberLiteral(text.to_string()), start);
        }
        Token::new(TokenKind::IntLiteral, start, self.cursor.pos())
    }

    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, start, self.cursor.pos())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

//! Recursive descent parser for Kestrel.
//!
//! The parser owns the significant tokens (trivia is dropped up front) and a
//! position into them. Every `parse_*` method either returns a finished node
//! or the first [`ParseError`]; there is no recovery. The grammar needs at
//! most two tokens of lookahead (to tell `let f x = ...` from `let f = ...`),
//! so nothing is ever backtracked.

use kestrel_common::span::Span;
use kestrel_common::token::{Token, TokenKind};

use crate::ast::{Expr, ExprKind, Pattern};
use crate::error::ParseError;

pub(crate) struct Parser<'src> {
    /// Significant tokens, always ending with `Eof`.
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = source.len() as u32;
            tokens.push(Token::new(TokenKind::Eof, end, end));
        }
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn current(&self) -> TokenKind {
        self.nth(0)
    }

    fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map_or_else(
            || {
                let end = self.source.len() as u32;
                Span::new(end, end)
            },
            |t| t.span,
        )
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    // ── Consumption ────────────────────────────────────────────────────

    /// Consume the current token. `Eof` is never consumed.
    fn advance(&mut self) -> Token {
        let token = Token {
            kind: self.current(),
            span: self.current_span(),
        };
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// `)` closing the `(` at `open`.
    fn expect_close(&mut self, open: Span) -> Result<Token, ParseError> {
        if self.at(TokenKind::RParen) {
            return Ok(self.advance());
        }
        Err(ParseError::with_related(
            format!("expected `)`, found {}", self.current()),
            self.current_span(),
            "`(` opened here",
            open,
        ))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            format!("expected {expected}, found {}", self.current()),
            self.current_span(),
        )
    }

    fn text(&self, token: &Token) -> &'src str {
        token.text(self.source)
    }

    // ── Entry point ────────────────────────────────────────────────────

    /// A whole program: one expression followed by end of input.
    pub(crate) fn parse_program(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        if !self.at(TokenKind::Eof) {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    // ── Expressions ────────────────────────────────────────────────────

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        match self.current() {
            TokenKind::Fn => self.parse_lambda(),
            TokenKind::Let => self.parse_let(),
            TokenKind::If => self.parse_if(),
            _ => self.parse_app(),
        }
    }

    /// `fn p -> body`
    fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        let fn_kw = self.expect(TokenKind::Fn)?;
        let (param, _) = self.parse_pattern()?;
        self.expect(TokenKind::Arrow)?;
        let body = self.parse_expr()?;
        let span = fn_kw.span.merge(body.span);
        Ok(Expr::new(ExprKind::Lam(param, Box::new(body)), span))
    }

    /// `let p = bound in body`, or the function form
    /// `let f p1 .. pn = bound in body` which binds `f` to
    /// `fn p1 -> .. -> fn pn -> bound`.
    fn parse_let(&mut self) -> Result<Expr, ParseError> {
        let let_kw = self.expect(TokenKind::Let)?;
        let is_function_form = self.at(TokenKind::Ident) && self.nth(1) != TokenKind::Eq;

        let (pattern, params) = if is_function_form {
            let name = self.advance();
            let mut params = Vec::new();
            while !self.at(TokenKind::Eq) {
                params.push(self.parse_pattern()?);
            }
            (Pattern::var(self.text(&name)), params)
        } else {
            (self.parse_pattern()?.0, Vec::new())
        };

        self.expect(TokenKind::Eq)?;
        let mut bound = self.parse_expr()?;
        for (param, param_span) in params.into_iter().rev() {
            let span = param_span.merge(bound.span);
            bound = Expr::new(ExprKind::Lam(param, Box::new(bound)), span);
        }
        self.expect(TokenKind::In)?;
        let body = self.parse_expr()?;
        let span = let_kw.span.merge(body.span);
        Ok(Expr::new(
            ExprKind::Let(pattern, Box::new(bound), Box::new(body)),
            span,
        ))
    }

    /// `if cond then a else b`
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let if_kw = self.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let then_branch = self.parse_expr()?;
        self.expect(TokenKind::Else)?;
        let else_branch = self.parse_expr()?;
        let span = if_kw.span.merge(else_branch.span);
        Ok(Expr::new(
            ExprKind::If(
                Box::new(cond),
                Box::new(then_branch),
                Box::new(else_branch),
            ),
            span,
        ))
    }

    /// Left-associative juxtaposition. A `fn`, `let` or `if` may be the
    /// final argument and extends as far right as it can.
    fn parse_app(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            if starts_atom(self.current()) {
                let arg = self.parse_atom()?;
                expr = apply(expr, arg);
            } else if matches!(
                self.current(),
                TokenKind::Fn | TokenKind::Let | TokenKind::If
            ) {
                let arg = self.parse_expr()?;
                expr = apply(expr, arg);
                break;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        match self.current() {
            TokenKind::IntLiteral => {
                let token = self.advance();
                let text = self.text(&token);
                let value = text
                    .parse::<i64>()
                    .expect("the lexer only accepts integer literals that fit in i64");
                Ok(Expr::new(ExprKind::Int(value), span))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.advance();
                Ok(Expr::new(ExprKind::Bool(token.kind == TokenKind::True), span))
            }
            TokenKind::Ident => {
                let token = self.advance();
                Ok(Expr::new(ExprKind::Var(self.text(&token).to_string()), span))
            }
            TokenKind::LParen => self.parse_paren(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `()`, `(e)` (just `e`), or `(e1, .., en)`.
    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        let open = self.expect(TokenKind::LParen)?.span;
        let mut elems = Vec::new();
        if !self.at(TokenKind::RParen) {
            elems.push(self.parse_expr()?);
            while self.eat(TokenKind::Comma) {
                elems.push(self.parse_expr()?);
            }
        }
        let close = self.expect_close(open)?.span;
        let span = open.merge(close);
        if elems.len() == 1 {
            let inner = elems.remove(0);
            return Ok(Expr::new(inner.kind, span));
        }
        Ok(Expr::new(ExprKind::Tuple(elems), span))
    }

    // ── Patterns ───────────────────────────────────────────────────────

    fn parse_pattern(&mut self) -> Result<(Pattern, Span), ParseError> {
        match self.current() {
            TokenKind::Ident => {
                let token = self.advance();
                Ok((Pattern::var(self.text(&token)), token.span))
            }
            TokenKind::LParen => {
                let open = self.advance().span;
                let mut elems = Vec::new();
                if !self.at(TokenKind::RParen) {
                    elems.push(self.parse_pattern()?.0);
                    while self.eat(TokenKind::Comma) {
                        elems.push(self.parse_pattern()?.0);
                    }
                }
                let close = self.expect_close(open)?.span;
                let span = open.merge(close);
                if elems.len() == 1 {
                    return Ok((elems.remove(0), span));
                }
                Ok((Pattern::Tuple(elems), span))
            }
            _ => Err(self.unexpected("pattern")),
        }
    }
}

fn apply(func: Expr, arg: Expr) -> Expr {
    let span = func.span.merge(arg.span);
    Expr::new(ExprKind::App(Box::new(func), Box::new(arg)), span)
}

fn starts_atom(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::IntLiteral
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Ident
            | TokenKind::LParen
    )
}

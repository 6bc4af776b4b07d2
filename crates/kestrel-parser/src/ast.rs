//! The Kestrel abstract syntax tree.
//!
//! Trees are built once by the parser and only read afterwards. Every
//! expression carries the span of the source it was parsed from; hand-built
//! trees (tests, tooling) use [`Span::default`]. Equality ignores spans.

use std::fmt::{self, Write};

use kestrel_common::span::Span;

/// A binding pattern: a name, or a tuple of sub-patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Var(String),
    Tuple(Vec<Pattern>),
}

impl Pattern {
    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Var(name.into())
    }

    pub fn tuple(elems: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Tuple(elems.into_iter().collect())
    }
}

/// An expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Int(i64),
    Bool(bool),
    Var(String),
    /// `f a`
    App(Box<Expr>, Box<Expr>),
    /// `fn p -> body`
    Lam(Pattern, Box<Expr>),
    /// `let p = bound in body`. `bound` may refer to the names `p` binds.
    Let(Pattern, Box<Expr>, Box<Expr>),
    /// `if cond then a else b`
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    /// `(e1, ..., en)`. The parser never produces a 1-tuple.
    Tuple(Vec<Expr>),
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    fn unspanned(kind: ExprKind) -> Self {
        Self::new(kind, Span::default())
    }

    pub fn int(value: i64) -> Self {
        Self::unspanned(ExprKind::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::unspanned(ExprKind::Bool(value))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::unspanned(ExprKind::Var(name.into()))
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Self::unspanned(ExprKind::App(Box::new(func), Box::new(arg)))
    }

    pub fn lam(param: Pattern, body: Expr) -> Self {
        Self::unspanned(ExprKind::Lam(param, Box::new(body)))
    }

    pub fn let_(pattern: Pattern, bound: Expr, body: Expr) -> Self {
        Self::unspanned(ExprKind::Let(pattern, Box::new(bound), Box::new(body)))
    }

    pub fn if_(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::unspanned(ExprKind::If(
            Box::new(cond),
            Box::new(then_branch),
            Box::new(else_branch),
        ))
    }

    pub fn tuple(elems: impl IntoIterator<Item = Expr>) -> Self {
        Self::unspanned(ExprKind::Tuple(elems.into_iter().collect()))
    }

    /// An indented one-node-per-line dump of the tree, with spans.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let span = format!("@{}..{}", self.span.start, self.span.end);
        // Writing to a String cannot fail.
        let _ = match &self.kind {
            ExprKind::Int(n) => writeln!(out, "{indent}Int {n} {span}"),
            ExprKind::Bool(b) => writeln!(out, "{indent}Bool {} {span}", bool_literal(*b)),
            ExprKind::Var(name) => writeln!(out, "{indent}Var {name} {span}"),
            ExprKind::App(..) => writeln!(out, "{indent}App {span}"),
            ExprKind::Lam(p, _) => writeln!(out, "{indent}Lam {p} {span}"),
            ExprKind::Let(p, ..) => writeln!(out, "{indent}Let {p} {span}"),
            ExprKind::If(..) => writeln!(out, "{indent}If {span}"),
            ExprKind::Tuple(_) => writeln!(out, "{indent}Tuple {span}"),
        };
        match &self.kind {
            ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Var(_) => {}
            ExprKind::App(f, a) => {
                f.write_tree(out, depth + 1);
                a.write_tree(out, depth + 1);
            }
            ExprKind::Lam(_, body) => body.write_tree(out, depth + 1),
            ExprKind::Let(_, bound, body) => {
                bound.write_tree(out, depth + 1);
                body.write_tree(out, depth + 1);
            }
            ExprKind::If(c, t, e) => {
                for child in [c, t, e] {
                    child.write_tree(out, depth + 1);
                }
            }
            ExprKind::Tuple(elems) => {
                for elem in elems {
                    elem.write_tree(out, depth + 1);
                }
            }
        }
    }
}

fn bool_literal(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

// ── Pretty-printing ──────────────────────────────────────────────────────

/// Where an expression is printed, which decides whether it needs parens.
#[derive(Clone, Copy, PartialEq)]
enum Position {
    /// Anywhere a full expression is allowed.
    Top,
    /// The function of an application.
    Head,
    /// The argument of an application.
    Arg,
}

fn fmt_expr(expr: &Expr, pos: Position, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let needs_parens = match &expr.kind {
        ExprKind::Lam(..) | ExprKind::Let(..) | ExprKind::If(..) => pos != Position::Top,
        ExprKind::App(..) => pos == Position::Arg,
        ExprKind::Int(n) => *n < 0 && pos == Position::Arg,
        _ => false,
    };
    if needs_parens {
        f.write_char('(')?;
    }
    match &expr.kind {
        ExprKind::Int(n) => fmt_int(*n, f)?,
        ExprKind::Bool(b) => f.write_str(bool_literal(*b))?,
        ExprKind::Var(name) => f.write_str(name)?,
        ExprKind::App(func, arg) => {
            fmt_expr(func, Position::Head, f)?;
            f.write_char(' ')?;
            fmt_expr(arg, Position::Arg, f)?;
        }
        ExprKind::Lam(p, body) => {
            write!(f, "fn {p} -> ")?;
            fmt_expr(body, Position::Top, f)?;
        }
        ExprKind::Let(p, bound, body) => {
            write!(f, "let {p} = ")?;
            fmt_expr(bound, Position::Top, f)?;
            f.write_str(" in ")?;
            fmt_expr(body, Position::Top, f)?;
        }
        ExprKind::If(c, t, e) => {
            f.write_str("if ")?;
            fmt_expr(c, Position::Top, f)?;
            f.write_str(" then ")?;
            fmt_expr(t, Position::Top, f)?;
            f.write_str(" else ")?;
            fmt_expr(e, Position::Top, f)?;
        }
        ExprKind::Tuple(elems) => {
            f.write_char('(')?;
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_expr(elem, Position::Top, f)?;
            }
            f.write_char(')')?;
        }
    }
    if needs_parens {
        f.write_char(')')?;
    }
    Ok(())
}

/// Kestrel has no negative literals, so a negative value prints as the
/// subtraction that computes it.
fn fmt_int(n: i64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match n {
        i64::MIN => write!(f, "sub (sub 0 {}) 1", i64::MAX),
        n if n < 0 => write!(f, "sub 0 {}", n.unsigned_abs()),
        n => write!(f, "{n}"),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, Position::Top, f)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Var(name) => f.write_str(name),
            Pattern::Tuple(elems) => {
                f.write_char('(')?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_char(')')
            }
        }
    }
}

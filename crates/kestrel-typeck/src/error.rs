//! Type errors.
//!
//! Every error aborts the inference call that raised it. The error carries
//! the span of the innermost expression whose inference failed, when the
//! failure came from inside an expression tree.

use std::fmt;

use kestrel_common::span::Span;
use kestrel_parser::Pattern;

use crate::ty::{TyVar, Type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// An identifier with no binding in scope.
    UnboundVariable(String),
    /// Unification met two incompatible shapes: expected, then found.
    TypeMismatch(Type, Type),
    /// A variable would have to contain itself (an infinite type).
    OccursCheckFailed(TyVar, Type),
    /// A tuple pattern and a tuple type disagree on element count.
    PatternArityMismatch(Pattern, Type),
    /// A tuple pattern matched against a type that is not a tuple.
    PatternTypeMismatch(Pattern, Type),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Option<Span>,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
        }
    }
}

impl From<TypeErrorKind> for TypeError {
    fn from(kind: TypeErrorKind) -> Self {
        Self { kind, span: None }
    }
}

impl fmt::Display for TypeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeErrorKind::UnboundVariable(name) => write!(f, "unbound variable `{name}`"),
            TypeErrorKind::TypeMismatch(expected, found) => {
                write!(f, "type mismatch: expected `{expected}`, found `{found}`")
            }
            TypeErrorKind::OccursCheckFailed(var, ty) => {
                write!(f, "infinite type: `{var}` occurs in `{ty}`")
            }
            TypeErrorKind::PatternArityMismatch(pattern, ty) => {
                let arity = match ty {
                    Type::Tuple(elems) => elems.len(),
                    _ => 1,
                };
                let elems = match pattern {
                    Pattern::Tuple(elems) => elems.len(),
                    Pattern::Var(_) => 1,
                };
                write!(
                    f,
                    "pattern `{pattern}` has {elems} elements, but `{ty}` has {arity}"
                )
            }
            TypeErrorKind::PatternTypeMismatch(pattern, ty) => {
                write!(f, "pattern `{pattern}` cannot destructure a value of type `{ty}`")
            }
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for TypeError {}

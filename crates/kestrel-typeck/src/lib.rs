//! Kestrel type checker: Hindley-Milner inference with let-polymorphism.
//!
//! The pieces, leaves first:
//!
//! - [`ty`]: types, type variables and schemes
//! - [`subst`]: substitutions and the [`Substitutable`] trait
//! - [`unify`]: structural unification with an occurs check
//! - [`env`]: type environments and generalization
//! - [`supply`]: fresh variables and instantiation
//! - [`pattern`]: binding tuple patterns against schemes
//! - [`infer`]: the Algorithm W driver
//!
//! The checker never logs and never rewrites the tree it is given: the
//! inferred type is its only output.

pub mod builtins;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod infer;
pub mod pattern;
pub mod subst;
pub mod supply;
pub mod ty;
pub mod unify;

use kestrel_parser::Expr;

pub use env::TypeEnv;
pub use error::{TypeError, TypeErrorKind};
pub use subst::{Subst, Substitutable};
pub use ty::{Scheme, TyVar, Type};

/// Infer the type of `expr` under `env`, with a variable supply owned by
/// this call.
pub fn infer_type(env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
    let (subst, ty) = infer::Infer::new().infer(env, expr)?;
    Ok(subst.apply(&ty))
}

/// The principal type scheme of a whole program, checked under the prelude.
pub fn check(expr: &Expr) -> Result<Scheme, TypeError> {
    let prelude = builtins::prelude();
    let ty = infer_type(&prelude, expr)?;
    Ok(env::generalize(&prelude, &ty))
}

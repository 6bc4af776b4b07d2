//! The prelude: names every program can use without binding them.

use crate::env::TypeEnv;
use crate::ty::{Scheme, TyVar, Type};

/// Names and schemes of the built-in functions, in declaration order.
pub fn builtin_schemes() -> Vec<(&'static str, Scheme)> {
    let int_binop = Scheme::mono(Type::func(Type::Int, Type::func(Type::Int, Type::Int)));
    let a = Type::var("a");
    vec![
        (
            "eq",
            Scheme::new(
                [TyVar::new("a")],
                Type::func(a.clone(), Type::func(a, Type::Bool)),
            ),
        ),
        ("add", int_binop.clone()),
        ("sub", int_binop.clone()),
        ("mul", int_binop),
    ]
}

/// The environment every top-level program is checked in.
pub fn prelude() -> TypeEnv {
    builtin_schemes()
        .into_iter()
        .map(|(name, scheme)| (name.to_string(), scheme))
        .collect()
}

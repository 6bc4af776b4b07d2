//! Pattern binding: extending an environment from a (possibly nested)
//! tuple pattern.

use kestrel_parser::Pattern;

use crate::env::TypeEnv;
use crate::error::TypeErrorKind;
use crate::ty::{Scheme, Type};

/// Extend `env` with one binding per name in `pattern`, destructuring
/// `scheme`'s body along the way.
///
/// Each component of a destructured tuple keeps only those quantifiers of
/// `scheme` that actually occur in it. A tuple pattern against a bare type
/// variable is a [`TypeErrorKind::PatternTypeMismatch`]: the caller refines
/// such variables (see [`check_shape`]) before binding.
pub fn bind(env: &TypeEnv, pattern: &Pattern, scheme: &Scheme) -> Result<TypeEnv, TypeErrorKind> {
    match pattern {
        Pattern::Var(name) => Ok(env.extend(name.as_str(), scheme.clone())),
        Pattern::Tuple(pats) => match &scheme.ty {
            Type::Tuple(tys) if tys.len() == pats.len() => {
                pats.iter().zip(tys).try_fold(env.clone(), |env, (pat, ty)| {
                    let component = Scheme::new(
                        scheme.vars.iter().filter(|v| ty.mentions(v)).cloned(),
                        ty.clone(),
                    );
                    bind(&env, pat, &component)
                })
            }
            Type::Tuple(_) => Err(TypeErrorKind::PatternArityMismatch(
                pattern.clone(),
                scheme.ty.clone(),
            )),
            _ => Err(TypeErrorKind::PatternTypeMismatch(
                pattern.clone(),
                scheme.ty.clone(),
            )),
        },
    }
}

/// Check that `ty` can be destructured by `pattern`.
///
/// Type variables are accepted anywhere, since unification can still give
/// them a tuple shape. Only a concrete disagreement is an error.
pub fn check_shape(pattern: &Pattern, ty: &Type) -> Result<(), TypeErrorKind> {
    match (pattern, ty) {
        (Pattern::Var(_), _) | (Pattern::Tuple(_), Type::Var(_)) => Ok(()),
        (Pattern::Tuple(pats), Type::Tuple(tys)) if pats.len() == tys.len() => pats
            .iter()
            .zip(tys)
            .try_for_each(|(pat, ty)| check_shape(pat, ty)),
        (Pattern::Tuple(_), Type::Tuple(_)) => Err(TypeErrorKind::PatternArityMismatch(
            pattern.clone(),
            ty.clone(),
        )),
        (Pattern::Tuple(_), _) => Err(TypeErrorKind::PatternTypeMismatch(
            pattern.clone(),
            ty.clone(),
        )),
    }
}

//! Structural unification with an occurs check.

use crate::error::TypeErrorKind;
use crate::subst::Subst;
use crate::ty::{TyVar, Type};

/// The most general substitution making `t1` and `t2` equal.
///
/// A mismatch reports `t1` as the expected side and `t2` as the found side.
pub fn unify(t1: &Type, t2: &Type) -> Result<Subst, TypeErrorKind> {
    if t1 == t2 {
        return Ok(Subst::empty());
    }
    match (t1, t2) {
        (Type::Var(v), other) | (other, Type::Var(v)) => bind_var(v, other),
        (Type::Func(p1, r1), Type::Func(p2, r2)) => {
            let s1 = unify(p1, p2)?;
            // The parameter solution must be visible when unifying results.
            let s2 = unify(&s1.apply(r1.as_ref()), &s1.apply(r2.as_ref()))?;
            Ok(s1.compose(&s2))
        }
        (Type::Tuple(xs), Type::Tuple(ys)) if xs.len() == ys.len() => {
            xs.iter().zip(ys).try_fold(Subst::empty(), |acc, (x, y)| {
                let s = unify(&acc.apply(x), &acc.apply(y))?;
                Ok(acc.compose(&s))
            })
        }
        _ => Err(TypeErrorKind::TypeMismatch(t1.clone(), t2.clone())),
    }
}

fn bind_var(var: &TyVar, ty: &Type) -> Result<Subst, TypeErrorKind> {
    if ty.mentions(var) {
        return Err(TypeErrorKind::OccursCheckFailed(var.clone(), ty.clone()));
    }
    Ok(Subst::singleton(var.clone(), ty.clone()))
}

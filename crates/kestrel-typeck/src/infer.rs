//! Algorithm W: syntax-directed inference over an [`Expr`] tree.
//!
//! `infer` returns a substitution together with a type that already has
//! that substitution applied. Substitutions are threaded left to right:
//! every sub-expression is inferred under the environment with all earlier
//! solutions applied, and results are combined with [`Subst::compose`],
//! oldest first.
//!
//! The first failure aborts the whole call. Errors raised while handling a
//! node carry that node's span; errors from children pass through
//! untouched, so the reported span is always the innermost one.

use kestrel_parser::{Expr, ExprKind, Pattern};

use crate::env::{generalize, TypeEnv};
use crate::error::{TypeError, TypeErrorKind};
use crate::pattern::{bind, check_shape};
use crate::subst::Subst;
use crate::supply::VarSupply;
use crate::ty::{Scheme, Type};
use crate::unify::unify;

/// Inference state for one top-level call: just the variable supply.
#[derive(Debug, Default)]
pub struct Infer {
    supply: VarSupply,
}

impl Infer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infer(&mut self, env: &TypeEnv, expr: &Expr) -> Result<(Subst, Type), TypeError> {
        let here = |kind: TypeErrorKind| TypeError::new(kind, expr.span);

        match &expr.kind {
            ExprKind::Int(_) => Ok((Subst::empty(), Type::Int)),
            ExprKind::Bool(_) => Ok((Subst::empty(), Type::Bool)),

            ExprKind::Var(name) => {
                let scheme = env
                    .lookup(name)
                    .ok_or_else(|| here(TypeErrorKind::UnboundVariable(name.clone())))?;
                Ok((Subst::empty(), self.supply.instantiate(scheme)))
            }

            ExprKind::App(func, arg) => {
                let (s1, func_ty) = self.infer(env, func)?;
                let (s2, arg_ty) = self.infer(&s1.apply(env), arg)?;
                let result = self.supply.fresh();
                let head = s2.apply(&func_ty);
                let expected = Type::func(arg_ty, result.clone());
                if !matches!(head, Type::Func(..) | Type::Var(_)) {
                    // A head of any other shape can never be applied.
                    return Err(here(TypeErrorKind::TypeMismatch(expected, head)));
                }
                let s3 = unify(&head, &expected).map_err(here)?;
                let result = s3.apply(&result);
                Ok((s1.compose(&s2).compose(&s3), result))
            }

            ExprKind::Lam(param, body) => {
                let param_ty = self.supply.fresh_for_pattern(param);
                let env = bind(env, param, &Scheme::mono(param_ty.clone())).map_err(here)?;
                let (s1, body_ty) = self.infer(&env, body)?;
                let func_ty = Type::func(s1.apply(&param_ty), body_ty);
                Ok((s1, func_ty))
            }

            ExprKind::Let(pattern, bound, body) => self.infer_let(env, expr, pattern, bound, body),

            ExprKind::If(cond, then_branch, else_branch) => {
                let (s1, cond_ty) = self.infer(env, cond)?;
                let s2 = unify(&Type::Bool, &cond_ty).map_err(here)?;
                let subst = s1.compose(&s2);

                let (s3, then_ty) = self.infer(&subst.apply(env), then_branch)?;
                let subst = subst.compose(&s3);

                let (s4, else_ty) = self.infer(&subst.apply(env), else_branch)?;
                let subst = subst.compose(&s4);

                let s5 = unify(&s4.apply(&then_ty), &else_ty).map_err(here)?;
                let result = s5.apply(&else_ty);
                Ok((subst.compose(&s5), result))
            }

            ExprKind::Tuple(elems) => {
                let mut subst = Subst::empty();
                let mut tys = Vec::with_capacity(elems.len());
                for elem in elems {
                    let (s, ty) = self.infer(&subst.apply(env), elem)?;
                    subst = subst.compose(&s);
                    tys.push(ty);
                }
                let tuple = Type::Tuple(tys.iter().map(|ty| subst.apply(ty)).collect());
                Ok((subst, tuple))
            }
        }
    }

    /// `let pattern = bound in body`, where `bound` may refer to the names
    /// `pattern` introduces.
    ///
    /// While `bound` is inferred those names are monomorphic placeholders,
    /// so recursive uses constrain the definition. The placeholder is then
    /// unified with the inferred type, which also gives a bare type variable
    /// the tuple shape a destructuring pattern needs. Only after that is the
    /// type generalized, against the outer environment with the solution so
    /// far applied.
    fn infer_let(
        &mut self,
        env: &TypeEnv,
        expr: &Expr,
        pattern: &Pattern,
        bound: &Expr,
        body: &Expr,
    ) -> Result<(Subst, Type), TypeError> {
        let here = |kind: TypeErrorKind| TypeError::new(kind, expr.span);

        let placeholder = self.supply.fresh_for_pattern(pattern);
        let rec_env = bind(env, pattern, &Scheme::mono(placeholder.clone())).map_err(here)?;
        let (s1, bound_ty) = self.infer(&rec_env, bound)?;

        check_shape(pattern, &bound_ty).map_err(here)?;
        let s2 = unify(&s1.apply(&placeholder), &bound_ty).map_err(here)?;
        let subst = s1.compose(&s2);
        let bound_ty = s2.apply(&bound_ty);

        let outer = subst.apply(env);
        let scheme = generalize(&outer, &bound_ty);
        let body_env = bind(&outer, pattern, &scheme).map_err(here)?;

        let (s3, body_ty) = self.infer(&body_env, body)?;
        Ok((subst.compose(&s3), body_ty))
    }
}

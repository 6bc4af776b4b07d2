//! Substitutions: finite maps from type variables to types.
//!
//! A substitution is an immutable value. Applying one builds a new type and
//! makes a single pass: a variable is replaced by its target, and the target
//! is not rewritten again. [`Subst::compose`] pre-resolves chains so that a
//! composed substitution has the combined effect in one application.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::env::TypeEnv;
use crate::ty::{Scheme, TyVar, Type};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subst(FxHashMap<TyVar, Type>);

impl Subst {
    /// The identity substitution.
    pub fn empty() -> Self {
        Subst(FxHashMap::default())
    }

    pub fn singleton(var: TyVar, ty: Type) -> Self {
        let mut map = FxHashMap::default();
        map.insert(var, ty);
        Subst(map)
    }

    pub fn get(&self, var: &TyVar) -> Option<&Type> {
        self.0.get(var)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Apply this substitution to a type, scheme, or context.
    pub fn apply<T: Substitutable>(&self, target: &T) -> T {
        target.apply_subst(self)
    }

    /// The substitution that applies `self` and then `newer`.
    ///
    /// `newer` is applied to every target of `self`; on a key present in
    /// both, `newer`'s mapping is kept. Callers pass the more recent
    /// substitution as `newer`.
    pub fn compose(&self, newer: &Subst) -> Subst {
        let mut map: FxHashMap<TyVar, Type> = self
            .0
            .iter()
            .map(|(var, ty)| (var.clone(), newer.apply(ty)))
            .collect();
        map.extend(newer.0.iter().map(|(var, ty)| (var.clone(), ty.clone())));
        Subst(map)
    }

    /// This substitution with the given variables removed from its domain.
    fn without(&self, vars: &BTreeSet<TyVar>) -> Subst {
        Subst(
            self.0
                .iter()
                .filter(|(var, _)| !vars.contains(*var))
                .map(|(var, ty)| (var.clone(), ty.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(TyVar, Type)> for Subst {
    fn from_iter<I: IntoIterator<Item = (TyVar, Type)>>(iter: I) -> Self {
        Subst(iter.into_iter().collect())
    }
}

/// Anything a substitution can be applied to.
pub trait Substitutable: Sized {
    fn apply_subst(&self, subst: &Subst) -> Self;

    /// Type variables occurring free in `self`.
    fn free_vars(&self) -> BTreeSet<TyVar>;
}

impl Substitutable for Type {
    fn apply_subst(&self, subst: &Subst) -> Type {
        match self {
            Type::Int | Type::Bool => self.clone(),
            Type::Var(v) => subst.get(v).cloned().unwrap_or_else(|| self.clone()),
            Type::Func(param, result) => {
                Type::func(param.apply_subst(subst), result.apply_subst(subst))
            }
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|t| t.apply_subst(subst)).collect()),
        }
    }

    fn free_vars(&self) -> BTreeSet<TyVar> {
        Type::free_vars(self)
    }
}

impl Substitutable for Scheme {
    /// Quantified variables are never captured: they are removed from the
    /// substitution before it reaches the body.
    fn apply_subst(&self, subst: &Subst) -> Scheme {
        let body = if self.vars.iter().any(|v| subst.get(v).is_some()) {
            self.ty.apply_subst(&subst.without(&self.vars))
        } else {
            self.ty.apply_subst(subst)
        };
        Scheme {
            vars: self.vars.clone(),
            ty: body,
        }
    }

    fn free_vars(&self) -> BTreeSet<TyVar> {
        Scheme::free_vars(self)
    }
}

impl Substitutable for TypeEnv {
    fn apply_subst(&self, subst: &Subst) -> TypeEnv {
        if subst.is_empty() {
            return self.clone();
        }
        self.map_schemes(|scheme| scheme.apply_subst(subst))
    }

    fn free_vars(&self) -> BTreeSet<TyVar> {
        self.schemes().flat_map(Scheme::free_vars).collect()
    }
}

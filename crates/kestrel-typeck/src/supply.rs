//! Fresh type variables and scheme instantiation.

use kestrel_parser::Pattern;

use crate::subst::Subst;
use crate::ty::{Scheme, TyVar, Type};

/// Source of never-repeating type variable names `t0`, `t1`, ...
///
/// Each top-level inference call owns its own supply, so independent calls
/// cannot collide and need no shared state.
#[derive(Debug, Default)]
pub struct VarSupply {
    next: u32,
}

impl VarSupply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_var(&mut self) -> TyVar {
        let var = TyVar(format!("t{}", self.next));
        self.next += 1;
        var
    }

    pub fn fresh(&mut self) -> Type {
        Type::Var(self.fresh_var())
    }

    /// A type shaped like `pattern`: a fresh variable per name, a tuple per
    /// tuple pattern.
    pub fn fresh_for_pattern(&mut self, pattern: &Pattern) -> Type {
        match pattern {
            Pattern::Var(_) => self.fresh(),
            Pattern::Tuple(elems) => {
                Type::Tuple(elems.iter().map(|p| self.fresh_for_pattern(p)).collect())
            }
        }
    }

    /// Replace each quantified variable with its own fresh variable.
    pub fn instantiate(&mut self, scheme: &Scheme) -> Type {
        if scheme.vars.is_empty() {
            return scheme.ty.clone();
        }
        let subst: Subst = scheme
            .vars
            .iter()
            .map(|v| (v.clone(), self.fresh()))
            .collect();
        subst.apply(&scheme.ty)
    }
}

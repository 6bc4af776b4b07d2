//! Type environment: the mapping from program identifiers to schemes.
//!
//! Environments are values. Extending one returns a new environment and
//! leaves the original untouched, so an outer scope can never observe the
//! bindings of an inner one.

use rustc_hash::FxHashMap;

use crate::subst::Substitutable;
use crate::ty::{Scheme, Type};

#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    bindings: FxHashMap<String, Scheme>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Scheme> {
        self.bindings.get(name)
    }

    /// A new environment with `name` bound to `scheme`, shadowing any
    /// previous binding of `name`.
    pub fn extend(&self, name: impl Into<String>, scheme: Scheme) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), scheme);
        TypeEnv { bindings }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.bindings.values()
    }

    pub(crate) fn map_schemes(&self, f: impl Fn(&Scheme) -> Scheme) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), f(scheme)))
                .collect(),
        }
    }
}

impl FromIterator<(String, Scheme)> for TypeEnv {
    fn from_iter<I: IntoIterator<Item = (String, Scheme)>>(iter: I) -> Self {
        TypeEnv {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Quantify `ty` over the variables the environment does not constrain.
pub fn generalize(env: &TypeEnv, ty: &Type) -> Scheme {
    let env_vars = env.free_vars();
    Scheme::new(
        ty.free_vars()
            .into_iter()
            .filter(|v| !env_vars.contains(v)),
        ty.clone(),
    )
}

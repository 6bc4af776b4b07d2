//! Type representation for the Kestrel type system.
//!
//! Defines `Type`, named type variables (`TyVar`), and polymorphic type
//! schemes (`Scheme`). Types are plain immutable values: inference never
//! mutates one in place, it builds new ones by applying substitutions.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A type variable, identified by name.
///
/// Variables produced during inference are named `t0`, `t1`, ...; the
/// prelude's quantified variables use single letters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TyVar(pub String);

impl TyVar {
    pub fn new(name: impl Into<String>) -> Self {
        TyVar(name.into())
    }
}

impl fmt::Display for TyVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Kestrel type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Var(TyVar),
    /// `param -> result`
    Func(Box<Type>, Box<Type>),
    /// `(t1, ..., tn)`; `()` when empty.
    Tuple(Vec<Type>),
}

impl Type {
    pub fn var(name: impl Into<String>) -> Type {
        Type::Var(TyVar::new(name))
    }

    pub fn func(param: Type, result: Type) -> Type {
        Type::Func(Box::new(param), Box::new(result))
    }

    pub fn tuple(elems: impl IntoIterator<Item = Type>) -> Type {
        Type::Tuple(elems.into_iter().collect())
    }

    /// Every type variable occurring in this type.
    pub fn free_vars(&self) -> BTreeSet<TyVar> {
        let mut vars = BTreeSet::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, out: &mut BTreeSet<TyVar>) {
        match self {
            Type::Int | Type::Bool => {}
            Type::Var(v) => {
                out.insert(v.clone());
            }
            Type::Func(param, result) => {
                param.collect_vars(out);
                result.collect_vars(out);
            }
            Type::Tuple(elems) => elems.iter().for_each(|t| t.collect_vars(out)),
        }
    }

    /// Whether `var` occurs anywhere in this type.
    pub fn mentions(&self, var: &TyVar) -> bool {
        match self {
            Type::Int | Type::Bool => false,
            Type::Var(v) => v == var,
            Type::Func(param, result) => param.mentions(var) || result.mentions(var),
            Type::Tuple(elems) => elems.iter().any(|t| t.mentions(var)),
        }
    }

    /// Type variables in order of first occurrence, left to right.
    fn vars_in_order(&self, out: &mut Vec<TyVar>) {
        match self {
            Type::Int | Type::Bool => {}
            Type::Var(v) => {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
            Type::Func(param, result) => {
                param.vars_in_order(out);
                result.vars_in_order(out);
            }
            Type::Tuple(elems) => elems.iter().for_each(|t| t.vars_in_order(out)),
        }
    }

    /// Rename every variable, in order of first occurrence, to `a`, `b`, ...
    ///
    /// Two types are alpha-equivalent exactly when their normal forms are
    /// equal.
    pub fn normalize(&self) -> Type {
        let mut order = Vec::new();
        self.vars_in_order(&mut order);
        let renaming: BTreeMap<TyVar, TyVar> = order
            .into_iter()
            .zip(pretty_names(&BTreeSet::new()))
            .collect();
        self.rename(&renaming)
    }

    fn rename(&self, renaming: &BTreeMap<TyVar, TyVar>) -> Type {
        match self {
            Type::Int | Type::Bool => self.clone(),
            Type::Var(v) => Type::Var(renaming.get(v).cloned().unwrap_or_else(|| v.clone())),
            Type::Func(param, result) => {
                Type::func(param.rename(renaming), result.rename(renaming))
            }
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|t| t.rename(renaming)).collect()),
        }
    }
}

/// `a`, `b`, ..., `z`, `a1`, `b1`, ..., skipping anything in `taken`.
fn pretty_names(taken: &BTreeSet<TyVar>) -> impl Iterator<Item = TyVar> + '_ {
    (0u32..)
        .map(|i| {
            let letter = char::from(b'a' + (i % 26) as u8);
            match i / 26 {
                0 => TyVar(letter.to_string()),
                n => TyVar(format!("{letter}{n}")),
            }
        })
        .filter(move |name| !taken.contains(name))
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::Bool => write!(f, "Bool"),
            Type::Var(v) => write!(f, "{v}"),
            Type::Func(param, result) => match param.as_ref() {
                // `->` associates to the right.
                Type::Func(..) => write!(f, "({param}) -> {result}"),
                _ => write!(f, "{param} -> {result}"),
            },
            Type::Tuple(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A polymorphic type scheme: a type with universally quantified variables.
///
/// For example, the prelude's `eq` is `forall a. a -> a -> Bool`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheme {
    /// The quantified (generic) type variables.
    pub vars: BTreeSet<TyVar>,
    /// The underlying type (may reference vars).
    pub ty: Type,
}

impl Scheme {
    pub fn new(vars: impl IntoIterator<Item = TyVar>, ty: Type) -> Self {
        Scheme {
            vars: vars.into_iter().collect(),
            ty,
        }
    }

    /// A monomorphic scheme (no quantified variables).
    pub fn mono(ty: Type) -> Self {
        Scheme {
            vars: BTreeSet::new(),
            ty,
        }
    }

    /// Variables of the body that are not quantified.
    pub fn free_vars(&self) -> BTreeSet<TyVar> {
        self.ty
            .free_vars()
            .into_iter()
            .filter(|v| !self.vars.contains(v))
            .collect()
    }
}

impl fmt::Display for Scheme {
    /// Quantified variables are renamed to `a`, `b`, ... in order of first
    /// occurrence; free variables keep their names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vars.is_empty() {
            return write!(f, "{}", self.ty);
        }
        let mut order = Vec::new();
        self.ty.vars_in_order(&mut order);
        order.retain(|v| self.vars.contains(v));
        // Vacuous quantifiers still get printed, after the used ones.
        order.extend(self.vars.iter().filter(|v| !self.ty.mentions(v)).cloned());

        let free = self.free_vars();
        let renaming: BTreeMap<TyVar, TyVar> =
            order.iter().cloned().zip(pretty_names(&free)).collect();

        write!(f, "forall")?;
        for v in &order {
            write!(f, " {}", renaming[v])?;
        }
        write!(f, ". {}", self.ty.rename(&renaming))
    }
}

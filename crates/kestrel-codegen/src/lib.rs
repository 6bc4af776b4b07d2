//! Kestrel code generation: lowers a type-checked [`Expr`] to JavaScript.
//!
//! The translation is syntax-directed and performs no checking of its own.
//! Feeding it a tree that failed type checking produces JavaScript that may
//! misbehave at run time.
//!
//! A `let` whose bound value reads its own names outside a function body
//! type checks but throws a `ReferenceError` when run. `let (a, b) = (1, a)
//! in b` has type `Int`, yet `a` is read before its `const` is initialized.
//! Recursion only works through functions, as in `let f = fn n -> f n`.

mod emit;
mod runtime;

use kestrel_parser::Expr;

/// A standalone JavaScript program that evaluates `expr` and prints the
/// result in Kestrel syntax.
pub fn generate_javascript(expr: &Expr) -> String {
    let mut out = String::from(runtime::PRELUDE);
    out.push_str("console.log($show(");
    emit::emit_expr(expr, &mut out);
    out.push_str("));\n");
    out
}

/// Just the JavaScript expression for `expr`, without the runtime prelude.
pub fn emit_expression(expr: &Expr) -> String {
    let mut out = String::new();
    emit::emit_expr(expr, &mut out);
    out
}

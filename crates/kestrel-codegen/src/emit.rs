//! Expression lowering: one JavaScript expression per Kestrel expression.
//!
//! Every compound form is emitted fully parenthesized, so no precedence
//! analysis is needed when nesting.

use kestrel_parser::{Expr, ExprKind, Pattern};

use crate::runtime::mangle;

pub(crate) fn emit_expr(expr: &Expr, out: &mut String) {
    match &expr.kind {
        ExprKind::Int(n) if *n < 0 => out.push_str(&format!("({n})")),
        ExprKind::Int(n) => out.push_str(&n.to_string()),
        ExprKind::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ExprKind::Var(name) => out.push_str(&mangle(name)),
        ExprKind::App(func, arg) => {
            emit_expr(func, out);
            out.push('(');
            emit_expr(arg, out);
            out.push(')');
        }
        ExprKind::Lam(param, body) => {
            out.push_str("((");
            emit_pattern(param, out);
            out.push_str(") => ");
            emit_expr(body, out);
            out.push(')');
        }
        // `const` closures see their own binding, so recursive functions work.
        // A non-function self-reference reads the binding too early.
        ExprKind::Let(pattern, bound, body) => {
            out.push_str("(() => {const ");
            emit_pattern(pattern, out);
            out.push_str(" = ");
            emit_expr(bound, out);
            out.push_str(";return ");
            emit_expr(body, out);
            out.push_str("})()");
        }
        ExprKind::If(cond, then_branch, else_branch) => {
            out.push('(');
            emit_expr(cond, out);
            out.push_str(" ? ");
            emit_expr(then_branch, out);
            out.push_str(" : ");
            emit_expr(else_branch, out);
            out.push(')');
        }
        ExprKind::Tuple(elems) => {
            out.push('[');
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                emit_expr(elem, out);
            }
            out.push(']');
        }
    }
}

/// Patterns become identifiers or array destructuring targets.
fn emit_pattern(pattern: &Pattern, out: &mut String) {
    match pattern {
        Pattern::Var(name) => out.push_str(&mangle(name)),
        Pattern::Tuple(elems) => {
            out.push('[');
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                emit_pattern(elem, out);
            }
            out.push(']');
        }
    }
}

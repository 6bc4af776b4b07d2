//! Code generation tests: parse a program and snapshot the emitted
//! JavaScript expression.

use insta::assert_snapshot;
use kestrel_codegen::{emit_expression, generate_javascript};

fn js(source: &str) -> String {
    let expr = kestrel_parser::parse(source).expect("source should parse");
    emit_expression(&expr)
}

#[test]
fn application_is_curried() {
    assert_snapshot!(js("add 1 2"), @"add(1)(2)");
}

#[test]
fn lambda_and_application() {
    assert_snapshot!(js("(fn x -> x) True"), @"((x) => x)(true)");
}

#[test]
fn conditional() {
    assert_snapshot!(js("if eq n 0 then 1 else n"), @"(eq(n)(0) ? 1 : n)");
}

#[test]
fn let_polymorphism() {
    assert_snapshot!(
        js("let id = fn x -> x in (id 1, id True)"),
        @"(() => {const id = ((x) => x);return [id(1), id(true)]})()"
    );
}

#[test]
fn self_reference_outside_a_function_is_emitted_as_is() {
    // Well typed, but `a` is read before its `const` is initialized.
    assert_snapshot!(
        js("let (a, b) = (1, a) in b"),
        @"(() => {const [a, b] = [1, a];return b})()"
    );
}

#[test]
fn destructuring_let() {
    assert_snapshot!(
        js("let (a, b) = (2, True) in if b then a else 0"),
        @"(() => {const [a, b] = [2, true];return (b ? a : 0)})()"
    );
}

#[test]
fn recursive_let() {
    assert_snapshot!(
        js("let fact = fn n -> if eq n 0 then 1 else mul n (fact (sub n 1)) in fact 5"),
        @"(() => {const fact = ((n) => (eq(n)(0) ? 1 : mul(n)(fact(sub(n)(1)))));return fact(5)})()"
    );
}

#[test]
fn function_form_let_is_desugared() {
    assert_snapshot!(
        js("let swap (x, y) = (y, x) in swap (1, True)"),
        @"(() => {const swap = (([x, y]) => [y, x]);return swap([1, true])})()"
    );
}

#[test]
fn reserved_identifiers_are_mangled() {
    assert_snapshot!(js("fn class -> class"), @"((class$) => class$)");
}

#[test]
fn program_wraps_expression_with_runtime() {
    let expr = kestrel_parser::parse("add 40 2").unwrap();
    let program = generate_javascript(&expr);
    assert!(program.starts_with("\"use strict\";\n"));
    assert!(program.contains("const mul = (a) => (b) => a * b;\n"));
    assert!(program.ends_with("console.log($show(add(40)(2)));\n"));
}

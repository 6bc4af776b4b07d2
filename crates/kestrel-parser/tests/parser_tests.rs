//! Parser integration tests: tree shape, desugaring, spans, and errors.

use insta::assert_snapshot;
use kestrel_common::span::Span;
use kestrel_parser::{parse, Expr, Pattern};

fn tree(source: &str) -> String {
    match parse(source) {
        Ok(expr) => expr.debug_tree().trim_end().to_string(),
        Err(err) => panic!("parse failed: {err} @{}..{}", err.span.start, err.span.end),
    }
}

fn error(source: &str) -> String {
    let err = parse(source).expect_err("expected a parse error");
    let mut out = format!("{} @{}..{}", err.message, err.span.start, err.span.end);
    if let Some((msg, span)) = &err.related {
        out.push_str(&format!("\n  related: {msg} @{}..{}", span.start, span.end));
    }
    out
}

fn var(name: &str) -> Expr {
    Expr::var(name)
}

// ── Literals and atoms ─────────────────────────────────────────────────

#[test]
fn literals() {
    assert_eq!(parse("42").unwrap(), Expr::int(42));
    assert_eq!(parse("True").unwrap(), Expr::bool(true));
    assert_eq!(parse("False").unwrap(), Expr::bool(false));
    assert_eq!(parse("true").unwrap(), var("true"));
}

#[test]
fn parenthesized_expression_is_not_a_tuple() {
    assert_eq!(parse("(x)").unwrap(), var("x"));
    assert_eq!(parse("((1))").unwrap(), Expr::int(1));
}

#[test]
fn tuples_and_unit() {
    assert_eq!(parse("()").unwrap(), Expr::tuple([]));
    assert_eq!(
        parse("(1, True, x)").unwrap(),
        Expr::tuple([Expr::int(1), Expr::bool(true), var("x")])
    );
}

#[test]
fn max_int_literal() {
    assert_eq!(
        parse("9223372036854775807").unwrap(),
        Expr::int(i64::MAX)
    );
}

// ── Application ────────────────────────────────────────────────────────

#[test]
fn application_is_left_associative() {
    assert_eq!(
        parse("f a b").unwrap(),
        Expr::app(Expr::app(var("f"), var("a")), var("b"))
    );
}

#[test]
fn application_argument_in_parens() {
    assert_eq!(
        parse("f (g x)").unwrap(),
        Expr::app(var("f"), Expr::app(var("g"), var("x")))
    );
}

#[test]
fn trailing_lambda_argument_extends_right() {
    assert_eq!(
        parse("map fn x -> f x").unwrap(),
        Expr::app(
            var("map"),
            Expr::lam(Pattern::var("x"), Expr::app(var("f"), var("x")))
        )
    );
}

// ── Binding forms ──────────────────────────────────────────────────────

#[test]
fn lambda_with_tuple_pattern() {
    assert_eq!(
        parse("fn (a, (b, c)) -> a").unwrap(),
        Expr::lam(
            Pattern::tuple([
                Pattern::var("a"),
                Pattern::tuple([Pattern::var("b"), Pattern::var("c")]),
            ]),
            var("a")
        )
    );
}

#[test]
fn unit_pattern() {
    assert_eq!(
        parse("fn () -> 1").unwrap(),
        Expr::lam(Pattern::tuple([]), Expr::int(1))
    );
}

#[test]
fn let_function_form_desugars_to_lambdas() {
    assert_eq!(
        parse("let compose f g = fn x -> f (g x) in compose").unwrap(),
        parse("let compose = fn f -> fn g -> fn x -> f (g x) in compose").unwrap()
    );
}

#[test]
fn let_function_form_with_tuple_parameter() {
    assert_eq!(
        parse("let swap (x, y) = (y, x) in swap").unwrap(),
        Expr::let_(
            Pattern::var("swap"),
            Expr::lam(
                Pattern::tuple([Pattern::var("x"), Pattern::var("y")]),
                Expr::tuple([var("y"), var("x")])
            ),
            var("swap")
        )
    );
}

#[test]
fn let_function_form_spans() {
    assert_snapshot!(tree("let k x y = x in k"), @r###"
    Let k @0..18
      Lam x @6..13
        Lam y @8..13
          Var x @12..13
      Var k @17..18
    "###);
}

#[test]
fn destructure_fixture() {
    let source = include_str!("../../../tests/fixtures/destructure.kes");
    assert_snapshot!(tree(source), @r###"
    Let (a, b) @0..44
      Tuple @13..22
        Int 2 @14..15
        Bool True @17..21
      If @26..44
        Var b @29..30
        Var a @36..37
        Int 0 @43..44
    "###);
}

#[test]
fn comments_are_skipped() {
    let source = include_str!("../../../tests/fixtures/factorial.kes");
    let expr = parse(source).unwrap();
    assert_eq!(
        expr.to_string(),
        "let fact = fn n -> if eq n 0 then 1 else mul n (fact (sub n 1)) in fact"
    );
    assert_eq!(expr.span, Span::new(75, 156));
}

// ── Pretty-printing round trip ─────────────────────────────────────────

#[test]
fn display_reparses_to_the_same_tree() {
    let programs = [
        "let id = fn x -> x in (id 1, id True)",
        "(fn x -> add x 1) True",
        "f (if c then a else b) (let y = 1 in y)",
        "let (a, (b, c)) = (1, (True, ())) in if b then a else c",
        "g fn x -> let y = x in y",
    ];
    for source in programs {
        let expr = parse(source).unwrap();
        let printed = expr.to_string();
        assert_eq!(parse(&printed).unwrap(), expr, "{printed}");
    }
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn error_missing_arrow() {
    assert_snapshot!(error("fn x x"), @"expected `->`, found identifier @5..6");
}

#[test]
fn error_missing_in() {
    assert_snapshot!(error("let x = 1"), @"expected `in`, found end of input @9..9");
}

#[test]
fn error_unclosed_paren_points_at_opener() {
    assert_snapshot!(error("f (1, 2"), @r###"
    expected `)`, found end of input @7..7
      related: `(` opened here @2..3
    "###);
}

#[test]
fn error_let_function_form_without_equals() {
    assert_snapshot!(error("let f x in x"), @"expected pattern, found `in` @8..10");
}

#[test]
fn error_empty_input() {
    assert_snapshot!(error(""), @"expected expression, found end of input @0..0");
}

#[test]
fn error_integer_out_of_range() {
    assert_snapshot!(
        error("99999999999999999999"),
        @"invalid number literal: 99999999999999999999 @0..20"
    );
    // One past i64::MAX is rejected by the lexer before parsing starts.
    assert_snapshot!(
        error("9223372036854775808"),
        @"invalid number literal: 9223372036854775808 @0..19"
    );
}

#[test]
fn error_trailing_comma_in_tuple() {
    assert_snapshot!(error("(1,)"), @"expected expression, found `)` @3..4");
}

#[test]
fn negative_literal_display_reparses() {
    let printed = Expr::app(Expr::var("f"), Expr::int(-3)).to_string();
    assert_eq!(printed, "f (sub 0 3)");
    let reparsed = parse(&printed).expect("printed tree should parse");
    assert_eq!(
        reparsed,
        Expr::app(
            Expr::var("f"),
            Expr::app(Expr::app(Expr::var("sub"), Expr::int(0)), Expr::int(3)),
        )
    );
}

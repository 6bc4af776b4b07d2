//! Integration tests for Kestrel type inference.
//!
//! Each test parses a program, checks it under the prelude, and asserts on
//! the principal type scheme or on the error kind.

use kestrel_typeck::builtins::prelude;
use kestrel_typeck::{check, infer_type, TypeError, TypeErrorKind, Type};

// ── Helpers ────────────────────────────────────────────────────────────

fn check_source(src: &str) -> Result<String, TypeError> {
    let expr = kestrel_parser::parse(src)
        .unwrap_or_else(|e| panic!("parse error in {src:?}: {e}"));
    check(&expr).map(|scheme| scheme.to_string())
}

/// Assert that `src` checks and its principal scheme prints as `expected`.
fn assert_scheme(src: &str, expected: &str) {
    match check_source(src) {
        Ok(actual) => assert_eq!(actual, expected, "for source {src:?}"),
        Err(e) => panic!("expected `{expected}` for {src:?}, got error: {e}"),
    }
}

fn check_error(src: &str) -> TypeErrorKind {
    match check_source(src) {
        Ok(ty) => panic!("expected a type error for {src:?}, got `{ty}`"),
        Err(e) => e.kind,
    }
}

fn fixture(name: &str) -> String {
    let path = format!("{}/../../tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"))
}

// ── Literals and builtins ──────────────────────────────────────────────

#[test]
fn test_literals() {
    assert_scheme("42", "Int");
    assert_scheme("True", "Bool");
    assert_scheme("()", "()");
    assert_scheme("(1, (False, ()))", "(Int, (Bool, ()))");
}

#[test]
fn test_builtins() {
    assert_scheme("add", "Int -> Int -> Int");
    assert_scheme("eq", "forall a. a -> a -> Bool");
    assert_scheme("eq True", "Bool -> Bool");
    assert_scheme("mul (sub 5 2)", "Int -> Int");
}

// ── Functions ──────────────────────────────────────────────────────────

#[test]
fn test_identity() {
    assert_scheme("fn x -> x", "forall a. a -> a");
}

#[test]
fn test_const_and_compose() {
    assert_scheme("fn x -> fn y -> x", "forall a b. a -> b -> a");
    assert_scheme(
        "fn f -> fn g -> fn x -> f (g x)",
        "forall a b c. (a -> b) -> (c -> a) -> c -> b",
    );
}

#[test]
fn test_tuple_parameter() {
    assert_scheme("fn (x, y) -> (y, x)", "forall a b. (a, b) -> (b, a)");
    assert_scheme("fn () -> 1", "() -> Int");
}

#[test]
fn test_application_infers_through_builtins() {
    assert_scheme("fn x -> add x 1", "Int -> Int");
    assert_scheme("fn x -> fn y -> eq x y", "forall a. a -> a -> Bool");
}

// ── Let-polymorphism ───────────────────────────────────────────────────

#[test]
fn test_let_polymorphism() {
    assert_scheme("let id = fn x -> x in (id 1, id True)", "(Int, Bool)");
}

#[test]
fn test_polymorphism_fixture() {
    assert_scheme(&fixture("polymorphism.kes"), "(Int, Bool)");
}

#[test]
fn test_let_bound_function_stays_polymorphic() {
    assert_scheme("let k x y = x in k", "forall a b. a -> b -> a");
}

#[test]
fn test_curried_fixture() {
    assert_scheme(&fixture("curried.kes"), "Int");
}

#[test]
fn test_lambda_bound_names_are_monomorphic() {
    assert!(matches!(
        check_error("fn f -> (f 1, f True)"),
        TypeErrorKind::TypeMismatch(..)
    ));
}

#[test]
fn test_generalization_respects_the_environment() {
    // `g` mentions the type of `f`, which the enclosing lambda owns, so `g`
    // must not be generalized: using it as both Int and Bool is an error.
    assert_eq!(
        check_error("fn f -> let g = f 1 in add g (if g then 1 else 2)"),
        TypeErrorKind::TypeMismatch(Type::Bool, Type::Int)
    );
}

// ── Recursion ──────────────────────────────────────────────────────────

#[test]
fn test_letrec_factorial() {
    assert_scheme(
        "let fact = fn n -> if eq n 0 then 1 else mul n (fact (sub n 1)) in fact",
        "Int -> Int",
    );
}

#[test]
fn test_factorial_fixture() {
    assert_scheme(&fixture("factorial.kes"), "Int -> Int");
}

#[test]
fn test_recursive_use_constrains_definition() {
    // The recursive call passes a Bool, so the parameter is Bool.
    assert_scheme(
        "let f = fn x -> if x then 0 else f False in f",
        "Bool -> Int",
    );
}

#[test]
fn test_occurs_check() {
    assert!(matches!(
        check_error("let f = fn x -> f in f"),
        TypeErrorKind::OccursCheckFailed(..)
    ));
    assert!(matches!(
        check_error("fn x -> x x"),
        TypeErrorKind::OccursCheckFailed(..)
    ));
}

// ── Tuple destructuring ────────────────────────────────────────────────

#[test]
fn test_destructuring() {
    assert_scheme("let (a, b) = (2, True) in a", "Int");
    assert_scheme("let (a, b) = (2, True) in b", "Bool");
    assert_scheme(&fixture("destructure.kes"), "Int");
}

#[test]
fn test_nested_destructuring() {
    assert_scheme(
        "let (a, (b, c)) = (1, (True, ())) in (c, b, a)",
        "((), Bool, Int)",
    );
}

#[test]
fn test_destructured_components_generalize_independently() {
    assert_scheme(
        "let (f, n) = (fn x -> x, 1) in (f 1, f True, n)",
        "(Int, Bool, Int)",
    );
}

#[test]
fn test_destructuring_refines_a_type_variable() {
    assert_scheme("fn p -> let (a, b) = p in add a b", "(Int, Int) -> Int");
    assert_scheme(
        "fn p -> let (a, b) = p in (b, a)",
        "forall a b. (a, b) -> (b, a)",
    );
}

#[test]
fn test_swap_fixture() {
    assert_scheme(&fixture("swap.kes"), "Int");
}

#[test]
fn test_arity_mismatch() {
    assert!(matches!(
        check_error("let (a, b) = (1, 2, 3) in a"),
        TypeErrorKind::PatternArityMismatch(..)
    ));
    assert!(matches!(
        check_error(&fixture("arity_mismatch.kes")),
        TypeErrorKind::PatternArityMismatch(..)
    ));
}

#[test]
fn test_destructuring_a_non_tuple() {
    assert_eq!(
        check_error("let (a, b) = 5 in a").to_string(),
        "pattern `(a, b)` cannot destructure a value of type `Int`"
    );
    assert!(matches!(
        check_error("let (a, b) = fn x -> x in a"),
        TypeErrorKind::PatternTypeMismatch(..)
    ));
}

#[test]
fn test_tuple_argument_arity_is_a_mismatch() {
    assert!(matches!(
        check_error("(fn (a, b) -> a) (1, 2, 3)"),
        TypeErrorKind::TypeMismatch(..)
    ));
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn test_unbound_variable() {
    assert_eq!(
        check_error("let x = 1 in add x y"),
        TypeErrorKind::UnboundVariable("y".to_string())
    );
}

#[test]
fn test_application_mismatch() {
    assert_eq!(
        check_error("(fn x -> add x 1) True"),
        TypeErrorKind::TypeMismatch(Type::Int, Type::Bool)
    );
}

#[test]
fn test_tuple_elements_share_constraints() {
    assert_eq!(
        check_error("fn x -> (add x 1, if x then 1 else 2)"),
        TypeErrorKind::TypeMismatch(Type::Bool, Type::Int)
    );
}

#[test]
fn test_branches_share_constraints() {
    assert!(matches!(
        check_error("fn x -> if True then add x 1 else if x then 1 else 2"),
        TypeErrorKind::TypeMismatch(..)
    ));
}

#[test]
fn test_error_span_points_at_failing_expression() {
    let src = "let x = 1 in add x y";
    let expr = kestrel_parser::parse(src).unwrap();
    let err = check(&expr).unwrap_err();
    let span = err.span.expect("errors from a parsed tree carry a span");
    assert_eq!(&src[span.start as usize..span.end as usize], "y");
}

// ── infer_type ─────────────────────────────────────────────────────────

#[test]
fn test_infer_type_is_independent_per_call() {
    let expr = kestrel_parser::parse("fn x -> x").unwrap();
    let first = infer_type(&prelude(), &expr).unwrap();
    let second = infer_type(&prelude(), &expr).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.normalize().to_string(), "a -> a");
}

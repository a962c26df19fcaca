//! Integration tests for prefix expressions

#[path = "common/mod.rs"]
mod common;
use common::{eval, eval_error, program, ErrorKind};

fn int_result(expr: &str) -> String {
    let src = program(&format!("var int r\nassign r {}\nfunccall print r", expr));
    eval(&src).unwrap().concat()
}

fn bool_result(expr: &str) -> String {
    let src = program(&format!("var bool r\nassign r {}\nfunccall print r", expr));
    eval(&src).unwrap().concat()
}

#[test]
fn test_nested_prefix() {
    assert_eq!(int_result("+ 5 * 6 3"), "23");
    assert_eq!(int_result("- * 2 10 / 9 3"), "17");
}

#[test]
fn test_variables_in_expressions() {
    let src = program(
        "var int x y\nassign x 6\nassign y 7\nvar int r\nassign r * x y\nfunccall print r",
    );
    assert_eq!(eval(&src).unwrap(), vec!["42"]);
}

#[test]
fn test_negative_literals() {
    assert_eq!(int_result("+ -3 -4"), "-7");
    assert_eq!(int_result("- 0 -5"), "5");
}

#[test]
fn test_floor_semantics() {
    assert_eq!(int_result("/ -7 2"), "-4");
    assert_eq!(int_result("/ 7 -2"), "-4");
    assert_eq!(int_result("/ -8 2"), "-4");
    assert_eq!(int_result("% -7 3"), "2");
}

#[test]
fn test_comparisons() {
    assert_eq!(bool_result("<= 3 3"), "True");
    assert_eq!(bool_result(">= 2 3"), "False");
    assert_eq!(bool_result("!= 1 2"), "True");
    assert_eq!(bool_result("> \"b\" \"a\""), "True");
    assert_eq!(bool_result("== True True"), "True");
}

#[test]
fn test_logic() {
    assert_eq!(bool_result("| & True False ! False"), "True");
    assert_eq!(bool_result("! ! True"), "True");
}

#[test]
fn test_string_concat_with_empty() {
    let src = program("var string s\nassign s + \"\" \"x\"\nassign s + s s\nfunccall print s");
    assert_eq!(eval(&src).unwrap(), vec!["xx"]);
}

#[test]
fn test_comparison_across_types_fails() {
    let err = eval_error(&program("var bool r\nassign r == 1 \"1\""));
    assert_eq!(err.kind(), Some(ErrorKind::Type));
}

#[test]
fn test_function_values_have_no_operators() {
    let src = "func f void\nendfunc\nfunc main void\nvar bool r\nassign r == f f\nendfunc\n";
    let err = eval_error(src);
    assert_eq!(err.kind(), Some(ErrorKind::Type));
}

#[test]
fn test_division_by_zero() {
    let err = eval_error(&program("var int z\nvar int r\nassign r / 10 z"));
    assert_eq!(err.kind(), Some(ErrorKind::Fault));
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_unknown_variable_in_expression() {
    let err = eval_error(&program("var int r\nassign r + 1 missing"));
    assert_eq!(err.kind(), Some(ErrorKind::Name));
}

#[test]
fn test_leftover_operand() {
    let err = eval_error(&program("var int r\nassign r + 1 2 3"));
    assert_eq!(err.kind(), Some(ErrorKind::Syntax));
}

//! Expressions, precedence, and integer semantics.

use super::{expect_runtime_error, run_program};
use pl0::RuntimeError;

#[test]
fn multiplication_binds_tighter_than_addition() {
    let output = run_program(
        "program p;\n\
         var x;\n\
         begin x := 2 + 3 * 4; write(x) end",
    );
    assert_eq!(output, vec![14]);
}

#[test]
fn parentheses_override_precedence() {
    let output = run_program("program p; var x; begin x := (2 + 3) * 4; write(x) end");
    assert_eq!(output, vec![20]);
}

#[test]
fn division_truncates_toward_zero() {
    let output = run_program("program p; begin write(7 / 2); write(-7 / 2) end");
    assert_eq!(output, vec![3, -3]);
}

#[test]
fn modulo() {
    let output = run_program("program p; begin write(17 mod 5) end");
    assert_eq!(output, vec![2]);
}

#[test]
fn unary_minus() {
    let output = run_program("program p; var x; begin x := -5; write(x + 1) end");
    assert_eq!(output, vec![-4]);
}

#[test]
fn constants_fold_into_literals() {
    let output = run_program(
        "program p; const a := 10, b := -3; begin write(a + b) end",
    );
    assert_eq!(output, vec![7]);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let err = expect_runtime_error("program p; var x; begin x := 0; write(1 / x) end");
    assert!(matches!(err, RuntimeError::DivisionByZero { .. }));
}

#[test]
fn modulo_by_zero_is_a_runtime_error() {
    let err = expect_runtime_error("program p; var x; begin x := 0; write(1 mod x) end");
    assert!(matches!(err, RuntimeError::ModuloByZero { .. }));
}

#[test]
fn write_accepts_multiple_expressions() {
    let output = run_program("program p; begin write(1, 2, 3) end");
    assert_eq!(output, vec![1, 2, 3]);
}

#[test]
fn max_int_literal_round_trips() {
    let output = run_program("program p; begin write(2147483647) end");
    assert_eq!(output, vec![2147483647]);
}

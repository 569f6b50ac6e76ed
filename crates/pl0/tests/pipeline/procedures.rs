//! Procedure calls, parameters, recursion, and nesting.

use super::{expect_compile_error, run_program};

#[test]
fn call_with_value_parameter() {
    let output = run_program(
        "program p; var r;\n\
         procedure double(n); begin r := n * 2 end;\n\
         begin call double(21); write(r) end",
    );
    assert_eq!(output, vec![42]);
}

#[test]
fn parameters_are_passed_by_value() {
    let output = run_program(
        "program p; var x;\n\
         procedure clobber(v); begin v := 0 end;\n\
         begin x := 7; call clobber(x); write(x) end",
    );
    assert_eq!(output, vec![7]);
}

#[test]
fn multiple_parameters_in_declared_order() {
    let output = run_program(
        "program p; var r;\n\
         procedure sub(a, b); begin r := a - b end;\n\
         begin call sub(10, 4); write(r) end",
    );
    assert_eq!(output, vec![6]);
}

#[test]
fn recursion_factorial_of_five() {
    let output = run_program(
        "program p; var r;\n\
         procedure f(n); var t; begin\n\
           if n <= 1 then t := 1 else begin call f(n-1); t := r * n end;\n\
           r := t\n\
         end;\n\
         begin call f(5); write(r) end",
    );
    assert_eq!(output, vec![120]);
}

#[test]
fn nested_procedure_reaches_enclosing_locals() {
    let output = run_program(
        "program p; var g;\n\
         procedure outer(); var x;\n\
           procedure inner(); begin x := x + 1; g := x end;\n\
         begin x := 10; call inner(); call inner() end;\n\
         begin call outer(); write(g) end",
    );
    assert_eq!(output, vec![12]);
}

#[test]
fn sibling_procedures_call_earlier_siblings() {
    let output = run_program(
        "program p; var r;\n\
         procedure a(n); begin r := n + 1 end;\n\
         procedure b(n); begin call a(n * 10) end;\n\
         begin call b(4); write(r) end",
    );
    assert_eq!(output, vec![41]);
}

#[test]
fn procedure_locals_are_private_per_activation() {
    let output = run_program(
        "program p; var r;\n\
         procedure count(n); var local; begin\n\
           local := n;\n\
           if n > 0 then call count(n - 1);\n\
           r := r + local\n\
         end;\n\
         begin r := 0; call count(3); write(r) end",
    );
    // 3 + 2 + 1 + 0
    assert_eq!(output, vec![6]);
}

#[test]
fn shadowing_inside_procedure() {
    let output = run_program(
        "program p; var x;\n\
         procedure q(); var x; begin x := 99 end;\n\
         begin x := 1; call q(); write(x) end",
    );
    assert_eq!(output, vec![1]);
}

#[test]
fn too_few_arguments_is_a_compile_error() {
    expect_compile_error(
        "program p;\n\
         procedure f(a, b); begin end;\n\
         begin call f(1) end",
        "argument count mismatch",
    );
}

#[test]
fn too_many_arguments_is_a_compile_error() {
    expect_compile_error(
        "program p;\n\
         procedure f(); begin end;\n\
         begin call f(1, 2) end",
        "argument count mismatch",
    );
}

#[test]
fn calling_a_variable_is_a_compile_error() {
    expect_compile_error(
        "program p; var x; begin call x() end",
        "is not a procedure",
    );
}

#[test]
fn calling_an_undefined_procedure_is_a_compile_error() {
    expect_compile_error("program p; begin call nope() end", "undefined procedure");
}

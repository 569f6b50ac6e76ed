//! if/else, while, for, and odd conditions.

use super::run_program;

#[test]
fn if_then_taken() {
    let output = run_program("program p; begin if 1 < 2 then write(1) end");
    assert_eq!(output, vec![1]);
}

#[test]
fn if_then_skipped() {
    let output = run_program("program p; begin if 2 < 1 then write(1); write(9) end");
    assert_eq!(output, vec![9]);
}

#[test]
fn if_else_branches() {
    let output = run_program(
        "program p; var x;\n\
         begin\n\
           x := 5;\n\
           if odd x then write(1) else write(0);\n\
           if x > 10 then write(1) else write(0)\n\
         end",
    );
    assert_eq!(output, vec![1, 0]);
}

#[test]
fn while_loop_counts_down() {
    let output = run_program(
        "program p; var i;\n\
         begin i := 3; while i > 0 do begin write(i); i := i - 1 end end",
    );
    assert_eq!(output, vec![3, 2, 1]);
}

#[test]
fn while_with_false_condition_never_runs() {
    let output = run_program(
        "program p; var i; begin i := 0; while i > 0 do write(i); write(99) end",
    );
    assert_eq!(output, vec![99]);
}

#[test]
fn for_to_sums_one_through_ten() {
    let output = run_program(
        "program p; var s, i;\n\
         begin s := 0; for i := 1 to 10 do s := s + i; write(s) end",
    );
    assert_eq!(output, vec![55]);
}

#[test]
fn for_downto() {
    let output = run_program(
        "program p; var i; begin for i := 3 downto 1 do write(i) end",
    );
    assert_eq!(output, vec![3, 2, 1]);
}

#[test]
fn for_loop_with_empty_range_does_not_run() {
    let output = run_program(
        "program p; var i; begin for i := 5 to 4 do write(i); write(0) end",
    );
    assert_eq!(output, vec![0]);
}

#[test]
fn for_end_expression_is_reevaluated_each_iteration() {
    // The bound shrinks as the loop runs, so the loop stops early.
    let output = run_program(
        "program p; var i, n;\n\
         begin\n\
           n := 6;\n\
           for i := 1 to n do begin write(i); n := n - 1 end;\n\
           write(n)\n\
         end",
    );
    // i: 1 (n=5), 2 (n=4), 3 (n=3); i=4 > n=3 stops.
    assert_eq!(output, vec![1, 2, 3, 3]);
}

#[test]
fn loop_variable_retains_final_value() {
    let output = run_program(
        "program p; var i; begin for i := 1 to 3 do i := i; write(i) end",
    );
    assert_eq!(output, vec![4]);
}

#[test]
fn nested_loops() {
    let output = run_program(
        "program p; var i, j, c;\n\
         begin\n\
           c := 0;\n\
           for i := 1 to 3 do\n\
             for j := 1 to i do\n\
               c := c + 1;\n\
           write(c)\n\
         end",
    );
    assert_eq!(output, vec![6]);
}

#[test]
fn odd_condition() {
    let output = run_program(
        "program p; var i;\n\
         begin for i := 1 to 4 do if odd i then write(i) end",
    );
    assert_eq!(output, vec![1, 3]);
}

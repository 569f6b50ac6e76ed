//! Breakpoints, stepping, and mid-read suspension.

use std::cell::RefCell;
use std::rc::Rc;

use super::compile_source;
use pl0::{ExecState, Vm};

const SUM_PROGRAM: &str = "program p; var s, i;\n\
                           begin\n\
                           s := 0;\n\
                           for i := 1 to 10 do s := s + i;\n\
                           write(s)\n\
                           end";

#[test]
fn breakpoint_on_write_line_then_step_to_completion() {
    let compiled = compile_source(SUM_PROGRAM);
    assert!(compiled.success());

    let output = Rc::new(RefCell::new(Vec::new()));
    let output_handle = Rc::clone(&output);
    let mut vm = Vm::new(&compiled.code);
    vm.set_output(move |v| output_handle.borrow_mut().push(v));
    vm.set_symbols(&compiled.symbols);
    vm.set_debug_mode(true);
    vm.set_breakpoint(5);
    vm.start();

    vm.resume();
    assert_eq!(vm.state(), ExecState::Paused);
    assert_eq!(vm.current_line(), Some(5));

    // Nothing has been written yet at the pause.
    assert!(output.borrow().is_empty());

    while !matches!(vm.state(), ExecState::Halted | ExecState::Error) {
        vm.step();
    }
    assert_eq!(vm.state(), ExecState::Halted);
    assert_eq!(vm.error(), None);
    drop(vm);
    assert_eq!(*output.borrow(), vec![55]);
}

#[test]
fn removed_breakpoint_does_not_fire() {
    let compiled = compile_source(SUM_PROGRAM);
    let mut vm = Vm::new(&compiled.code);
    vm.set_output(|_| {});
    vm.set_debug_mode(true);
    vm.set_breakpoint(5);
    vm.remove_breakpoint(5);
    vm.start();
    vm.resume();
    assert_eq!(vm.state(), ExecState::Halted);
}

#[test]
fn named_variable_is_visible_at_breakpoint() {
    let compiled = compile_source(SUM_PROGRAM);
    let mut vm = Vm::new(&compiled.code);
    vm.set_output(|_| {});
    vm.set_symbols(&compiled.symbols);
    vm.set_debug_mode(true);
    vm.set_breakpoint(5);
    vm.start();
    vm.resume();

    assert_eq!(vm.state(), ExecState::Paused);
    assert_eq!(vm.get_value("s"), Some(55));
    assert_eq!(vm.get_value("nope"), None);
}

#[test]
fn step_over_advances_one_source_line() {
    let compiled = compile_source(SUM_PROGRAM);
    let mut vm = Vm::new(&compiled.code);
    vm.set_output(|_| {});
    vm.set_debug_mode(true);
    vm.start();

    // First instruction is the block's skip jump on line 1.
    vm.step_over();
    assert_eq!(vm.state(), ExecState::Paused);
    let line = vm.current_line().unwrap();
    assert!(line > 1, "stopped at line {}", line);
}

#[test]
fn call_stack_reflects_recursion_depth() {
    let compiled = compile_source(
        "program p; var r;\n\
         procedure f(n); begin\n\
         if n > 0 then call f(n - 1) else r := 1\n\
         end;\n\
         begin call f(3) end",
    );
    assert!(compiled.success());

    let mut vm = Vm::new(&compiled.code);
    vm.set_output(|_| {});
    vm.set_debug_mode(true);
    // Pause where the recursion bottoms out.
    vm.set_breakpoint(3);
    vm.start();

    let mut deepest = 0;
    while !matches!(vm.state(), ExecState::Halted | ExecState::Error) {
        vm.resume();
        deepest = deepest.max(vm.call_stack().len());
        if vm.state() == ExecState::Paused {
            continue;
        }
    }
    assert!(deepest >= 4, "observed depth {}", deepest);
}

#[test]
fn read_suspends_until_input_is_provided() {
    let compiled = compile_source(
        "program p; var x;\n\
         begin\n\
         read(x);\n\
         write(x + 1)\n\
         end",
    );
    assert!(compiled.success());

    let mut output = Vec::new();
    let mut vm = Vm::new(&compiled.code);
    vm.set_output(|v| output.push(v));
    vm.set_debug_mode(true);
    vm.start();

    vm.resume();
    assert_eq!(vm.state(), ExecState::WaitingInput);

    // Resuming without input parks again rather than misbehaving.
    vm.resume();
    assert_eq!(vm.state(), ExecState::WaitingInput);

    vm.provide_input(41);
    assert_eq!(vm.state(), ExecState::Paused);
    vm.resume();
    assert_eq!(vm.state(), ExecState::Halted);
    drop(vm);
    assert_eq!(output, vec![42]);
}

#[test]
fn registers_are_observable() {
    let compiled = compile_source("program p; var x; begin x := 1 end");
    let mut vm = Vm::new(&compiled.code);
    vm.set_debug_mode(true);
    vm.start();

    assert_eq!(vm.pc(), 0);
    assert_eq!(vm.base_ptr(), 0);
    vm.step(); // skip jump
    vm.step(); // frame allocation
    assert!(vm.stack_top() >= 4);
    assert!(vm.heap_bottom() > vm.stack_top());
}

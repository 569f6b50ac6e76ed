//! Debugger-visible execution state.

/// Where the machine is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExecState {
    /// Actively executing instructions.
    Running,
    /// Stopped at a breakpoint or after a step, ready to continue.
    Paused,
    /// Parked inside a `read` with no input source; the instruction
    /// has had no side effects and will re-execute once input arrives.
    WaitingInput,
    /// The program returned from its root frame (or never started).
    Halted,
    /// A runtime error terminated execution.
    Error,
}

/// One activation record, read off the dynamic-link chain.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StackFrame {
    /// Base address of the frame in the store.
    pub base: i32,
    /// Slot 0: base of the lexically enclosing frame.
    pub static_link: i32,
    /// Slot 1: the caller's base.
    pub dynamic_link: i32,
    /// Slot 2: code address to resume at on return.
    pub return_address: i32,
}

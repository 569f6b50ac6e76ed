//! Runtime errors.

use thiserror::Error;

/// Error raised during execution. Each variant carries the address of
/// the instruction that raised it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum RuntimeError {
    #[error("access violation: invalid address {addr} (PC={pc})")]
    AccessViolation { addr: i32, pc: usize },

    #[error("stack overflow (stack/heap collision) (PC={pc})")]
    StackOverflow { pc: usize },

    #[error("stack underflow during call (PC={pc})")]
    CallUnderflow { pc: usize },

    #[error("division by zero (PC={pc})")]
    DivisionByZero { pc: usize },

    #[error("modulo by zero (PC={pc})")]
    ModuloByZero { pc: usize },

    #[error("invalid allocation size {size} (PC={pc})")]
    InvalidAllocation { size: i32, pc: usize },

    #[error("out of memory (heap exhausted) (PC={pc})")]
    OutOfMemory { pc: usize },

    #[error("invalid operation code {code} (PC={pc})")]
    InvalidOperation { code: i32, pc: usize },
}

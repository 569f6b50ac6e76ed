//! Stack-based virtual machine for Extended PL/0 p-code.
//!
//! A single linear store holds both the stack (growing up from 0) and
//! the heap (growing down from the top). Activation records are linked
//! through static and dynamic links; the heap is a first-fit free list
//! sorted by address so freed neighbours coalesce. The machine doubles
//! as a debugger: it can pause on source-line breakpoints, single-step,
//! and park mid-`read` until input is provided.

mod debug;
mod error;
mod machine;

pub use debug::{ExecState, StackFrame};
pub use error::RuntimeError;
pub use machine::Vm;

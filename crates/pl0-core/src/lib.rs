//! Core types for the Extended PL/0 compiler.
//!
//! This crate provides the foundational types shared by the compiler
//! front end and the virtual machine:
//! - Tokens and keyword recognition
//! - The p-code instruction model and the emitting code builder
//! - Positioned diagnostics with error/warning accounting
//! - UTF-8 helpers for character-accurate columns

pub mod diag;
pub mod inst;
pub mod text;
pub mod token;

// Re-export commonly used types at crate root
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use inst::{CodeBuilder, Inst, Op, Opr};
pub use token::{Token, TokenKind};

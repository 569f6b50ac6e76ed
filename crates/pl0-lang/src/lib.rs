//! Compiler front end for Extended PL/0.
//!
//! The pipeline is single-pass: the [`Parser`] pulls tokens from the
//! [`Lexer`] and emits p-code directly through a
//! [`pl0_core::CodeBuilder`], maintaining the [`SymbolTable`] as scopes
//! open and close. There is no AST in memory; an optional indented
//! production trace can be captured as a side effect of parsing.

pub mod dump;
pub mod lexer;
pub mod parser;
pub mod symbols;

pub use lexer::Lexer;
pub use parser::Parser;
pub use symbols::{Symbol, SymbolKind, SymbolTable};

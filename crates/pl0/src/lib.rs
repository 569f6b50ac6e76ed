//! Extended PL/0: compiler and p-code virtual machine.
//!
//! The pipeline runs strictly left to right:
//!
//! ```text
//! source text → lexer → parser (+ symbol table, + code builder)
//!             → optional optimizer → interpreter
//! ```
//!
//! [`compile`] wires the front end together and returns the generated
//! code, the symbol table, and all diagnostics; the caller decides
//! whether to render, optimize, or execute.
//!
//! # Example
//!
//! ```
//! use pl0::{compile, SourceFile, Vm};
//!
//! let source = SourceFile::from_string(
//!     "demo.pl0",
//!     "program demo; var x; begin x := 2 + 3; write(x) end",
//! );
//! let compiled = compile(&source);
//! assert!(compiled.success());
//!
//! let mut output = Vec::new();
//! let mut vm = Vm::new(&compiled.code);
//! vm.set_output(|v| output.push(v));
//! vm.run();
//! drop(vm);
//! assert_eq!(output, vec![5]);
//! ```

pub use pl0_core::diag::{Diagnostic, Diagnostics, Severity};
pub use pl0_core::inst::{CodeBuilder, Inst, Op, Opr};
pub use pl0_core::token::{Token, TokenKind};
pub use pl0_lang::dump::{dump_code, dump_symbols, dump_tokens};
pub use pl0_lang::{Lexer, Parser, Symbol, SymbolKind, SymbolTable};
pub use pl0_opt::optimize;
pub use pl0_source::{DiagnosticRenderer, SourceFile};
pub use pl0_vm::{ExecState, RuntimeError, StackFrame, Vm};

/// Everything the front end produces for one source file.
pub struct Compilation {
    pub code: Vec<Inst>,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
    /// Indented production trace; empty unless requested.
    pub ast: String,
}

impl Compilation {
    /// Compilation succeeded iff no errors were reported.
    pub fn success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Compile a source file to p-code.
pub fn compile(source: &SourceFile) -> Compilation {
    compile_with_trace(source, false)
}

/// Compile, optionally capturing the parser's production trace.
pub fn compile_with_trace(source: &SourceFile, trace_ast: bool) -> Compilation {
    let mut symbols = SymbolTable::new();
    let mut code = CodeBuilder::new();
    let mut diagnostics = Diagnostics::new();

    let lexer = Lexer::new(source.source());
    let ast = {
        let mut parser = Parser::new(lexer, &mut symbols, &mut code, &mut diagnostics);
        if trace_ast {
            parser.enable_ast_trace();
        }
        parser.parse();
        parser.ast_trace().to_string()
    };

    Compilation {
        code: code.into_code(),
        symbols,
        diagnostics,
        ast,
    }
}

//! Plain-text dumps of tokens, symbols, and generated code.
//!
//! These back the CLI's `--tokens`, `--sym`, and `--code` flags. They
//! return strings so callers decide where (and whether) to print.

use std::fmt::Write;

use pl0_core::inst::{Inst, Op, Opr};
use pl0_core::token::Token;

use crate::symbols::{SymbolKind, SymbolTable};

/// Token sequence as a table of line/column/kind/lexeme.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let rule = "-".repeat(72);

    let _ = writeln!(out, "[Lexer] Token Sequence:");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "| {:<6}| {:<6}| {:<12}| {:<40}|",
        "Line", "Col", "Kind", "Lexeme"
    );
    let _ = writeln!(out, "{}", rule);

    for token in tokens {
        let _ = writeln!(
            out,
            "| {:<6}| {:<6}| {:<12}| {:<40}|",
            token.line,
            token.column,
            token.kind.as_str(),
            token.lexeme
        );
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total tokens: {}", tokens.len());
    out
}

/// Full declaration history of the symbol table.
pub fn dump_symbols(symbols: &SymbolTable) -> String {
    let mut out = String::new();
    let rule = "-".repeat(72);

    let _ = writeln!(out, "[Symbol Table] Declaration History:");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "| {:<5}| {:<15}| {:<8}| {:<6}| {:<12}| {:<12}|",
        "Index", "Name", "Kind", "Level", "Addr/Val", "Size/Params"
    );
    let _ = writeln!(out, "{}", rule);

    for (index, symbol) in symbols.history().iter().enumerate() {
        let (primary, secondary) = match symbol.kind {
            SymbolKind::Constant => (symbol.value.to_string(), "-".to_string()),
            SymbolKind::Variable | SymbolKind::Pointer => {
                (symbol.address.to_string(), "-".to_string())
            }
            SymbolKind::Array => (symbol.address.to_string(), symbol.size.to_string()),
            SymbolKind::Procedure => {
                (symbol.address.to_string(), symbol.param_count.to_string())
            }
        };
        let _ = writeln!(
            out,
            "| {:<5}| {:<15}| {:<8}| {:<6}| {:<12}| {:<12}|",
            index,
            symbol.name,
            symbol.kind.as_str(),
            symbol.level,
            primary,
            secondary
        );
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total symbols: {}", symbols.history().len());
    out
}

/// Generated p-code with one commented line per instruction.
pub fn dump_code(code: &[Inst]) -> String {
    let mut out = String::new();
    let rule = "-".repeat(60);

    let _ = writeln!(out, "[P-Code] Generated Instructions:");
    let _ = writeln!(out, "{}", rule);

    for (addr, inst) in code.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:4}: L{:<3} {:<4} {:2}, {:5}    ; {}",
            addr,
            inst.line,
            inst.op.as_str(),
            inst.l,
            inst.a,
            describe(inst)
        );
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total instructions: {}", code.len());
    out
}

fn describe(inst: &Inst) -> String {
    match inst.op {
        Op::Lit => format!("push constant {}", inst.a),
        Op::Lod => {
            if inst.a == 0 {
                "indirect load".to_string()
            } else {
                format!("load [{}, {}]", inst.l, inst.a)
            }
        }
        Op::Sto => {
            if inst.a == 0 {
                "indirect store".to_string()
            } else {
                format!("store to [{}, {}]", inst.l, inst.a)
            }
        }
        Op::Cal => format!("call @{}", inst.a),
        Op::Int => format!("allocate {} slots", inst.a),
        Op::Jmp => format!("jump to {}", inst.a),
        Op::Jpc => format!("jump if zero to {}", inst.a),
        Op::Opr => Opr::from_operand(inst.a)
            .map(|opr| opr.as_str().to_string())
            .unwrap_or_else(|| format!("invalid operation {}", inst.a)),
        Op::Red => {
            if inst.a == 0 {
                "read indirect".to_string()
            } else {
                format!("read to [{}, {}]", inst.l, inst.a)
            }
        }
        Op::Wrt => "write".to_string(),
        Op::New => "heap alloc".to_string(),
        Op::Del => "heap free".to_string(),
        Op::Lad => format!("push address of [{}, {}]", inst.l, inst.a),
    }
}

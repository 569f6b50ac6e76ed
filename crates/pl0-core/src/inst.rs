//! P-code instruction model and the emitting code builder.

use std::fmt;

/// P-code operation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    /// Push the literal operand.
    Lit,
    /// Load: direct (`a != 0`, frame offset via static links) or
    /// indirect (`a == 0`, absolute address on the stack).
    Lod,
    /// Store, with the same two addressing modes as `Lod`.
    Sto,
    /// Call: pops the argument count, builds the linkage triple, jumps.
    Cal,
    /// Grow the stack top by the operand.
    Int,
    /// Unconditional jump.
    Jmp,
    /// Jump if the popped value is zero.
    Jpc,
    /// Arithmetic / relational / return operation selected by `a`.
    Opr,
    /// Read an integer into a store cell.
    Red,
    /// Pop and write an integer.
    Wrt,
    /// Pop a size, heap-allocate, push the data pointer.
    New,
    /// Pop a pointer, return its block to the free list.
    Del,
    /// Push the absolute address of a frame slot.
    Lad,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Lit => "LIT",
            Op::Lod => "LOD",
            Op::Sto => "STO",
            Op::Cal => "CAL",
            Op::Int => "INT",
            Op::Jmp => "JMP",
            Op::Jpc => "JPC",
            Op::Opr => "OPR",
            Op::Red => "RED",
            Op::Wrt => "WRT",
            Op::New => "NEW",
            Op::Del => "DEL",
            Op::Lad => "LAD",
        }
    }
}

/// Operations selected by the `OPR` operand.
///
/// The numeric values are part of the instruction encoding and must not
/// be reordered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(i32)]
pub enum Opr {
    Ret = 0,
    Neg = 1,
    Add = 2,
    Sub = 3,
    Mul = 4,
    Div = 5,
    Odd = 6,
    Mod = 7,
    Eql = 8,
    Neq = 9,
    Lss = 10,
    Geq = 11,
    Gtr = 12,
    Leq = 13,
}

impl Opr {
    /// Decode an `OPR` operand.
    pub fn from_operand(a: i32) -> Option<Opr> {
        let opr = match a {
            0 => Opr::Ret,
            1 => Opr::Neg,
            2 => Opr::Add,
            3 => Opr::Sub,
            4 => Opr::Mul,
            5 => Opr::Div,
            6 => Opr::Odd,
            7 => Opr::Mod,
            8 => Opr::Eql,
            9 => Opr::Neq,
            10 => Opr::Lss,
            11 => Opr::Geq,
            12 => Opr::Gtr,
            13 => Opr::Leq,
            _ => return None,
        };
        Some(opr)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Opr::Ret => "return",
            Opr::Neg => "negate",
            Opr::Add => "add",
            Opr::Sub => "subtract",
            Opr::Mul => "multiply",
            Opr::Div => "divide",
            Opr::Odd => "odd",
            Opr::Mod => "modulo",
            Opr::Eql => "equal",
            Opr::Neq => "not equal",
            Opr::Lss => "less than",
            Opr::Geq => "greater or equal",
            Opr::Gtr => "greater than",
            Opr::Leq => "less or equal",
        }
    }
}

/// A single p-code instruction.
///
/// `l` is the static-link chase count for memory access opcodes; `a`
/// is a literal operand or code address. `line` is the source line of
/// the token that triggered emission, used by diagnostics, tracing,
/// and source-line breakpoints.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Inst {
    pub op: Op,
    pub l: i32,
    pub a: i32,
    pub line: u32,
}

impl Inst {
    pub fn new(op: Op, l: i32, a: i32, line: u32) -> Self {
        Self { op, l, a, line }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.op.as_str(), self.l, self.a)
    }
}

/// Append-only instruction builder with backpatching.
///
/// Forward jumps are emitted with a placeholder operand and patched
/// once the landing site is known.
#[derive(Default)]
pub struct CodeBuilder {
    code: Vec<Inst>,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    /// Emit an instruction and return its address.
    pub fn emit(&mut self, op: Op, l: i32, a: i32, line: u32) -> usize {
        let addr = self.code.len();
        self.code.push(Inst::new(op, l, a, line));
        addr
    }

    /// Rewrite the operand of a previously emitted jump or call.
    pub fn backpatch(&mut self, addr: usize, target: usize) {
        if let Some(inst) = self.code.get_mut(addr) {
            inst.a = target as i32;
        }
    }

    /// Address the next emitted instruction will get.
    pub fn next_addr(&self) -> usize {
        self.code.len()
    }

    pub fn code(&self) -> &[Inst] {
        &self.code
    }

    pub fn into_code(self) -> Vec<Inst> {
        self.code
    }

    /// Replace the instruction stream (after optimization).
    pub fn set_code(&mut self, code: Vec<Inst>) {
        self.code = code;
    }
}

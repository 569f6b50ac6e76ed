//! Behaviour-preserving optimizer over the p-code stream.
//!
//! The pipeline partitions the instruction vector into basic blocks at
//! jump/call targets and after terminators, applies local constant
//! folding and strength reduction inside each block, then rebuilds the
//! control-flow graph, drops blocks unreachable from block 0, and
//! flattens the survivors with every `JMP`/`JPC`/`CAL` operand
//! remapped through an old→new address table. Call targets count as
//! block leaders and call edges count for reachability, so procedure
//! bodies survive dead-code elimination.

use std::collections::{BTreeMap, BTreeSet};

use pl0_core::inst::{Inst, Op, Opr};

struct BasicBlock {
    /// Address of the first instruction in the unoptimized stream.
    start_addr: usize,
    insts: Vec<Inst>,
    successors: Vec<usize>,
    reachable: bool,
}

/// Optimize an instruction stream. The result computes the same
/// outputs and raises the same runtime errors as the input for
/// well-formed programs.
pub fn optimize(input: Vec<Inst>) -> Vec<Inst> {
    if input.is_empty() {
        return input;
    }

    let targets = collect_targets(&input);
    let mut blocks = build_blocks(&input, &targets);

    for block in &mut blocks {
        constant_folding(block);
        strength_reduction(block);
    }

    build_cfg(&mut blocks);
    mark_reachable(&mut blocks, 0);
    flatten(blocks)
}

/// Addresses that must start a basic block: jump and call targets.
fn collect_targets(code: &[Inst]) -> BTreeSet<usize> {
    let mut targets = BTreeSet::new();
    for inst in code {
        if matches!(inst.op, Op::Jmp | Op::Jpc | Op::Cal) && inst.a >= 0 {
            targets.insert(inst.a as usize);
        }
    }
    targets
}

fn is_terminator(inst: &Inst) -> bool {
    match inst.op {
        Op::Jmp | Op::Jpc => true,
        Op::Opr => inst.a == Opr::Ret as i32,
        _ => false,
    }
}

fn build_blocks(code: &[Inst], targets: &BTreeSet<usize>) -> Vec<BasicBlock> {
    let mut blocks = Vec::new();
    let mut current = BasicBlock {
        start_addr: 0,
        insts: Vec::new(),
        successors: Vec::new(),
        reachable: false,
    };

    for (addr, inst) in code.iter().enumerate() {
        let split = addr > 0 && (targets.contains(&addr) || is_terminator(&code[addr - 1]));
        if split {
            blocks.push(current);
            current = BasicBlock {
                start_addr: addr,
                insts: Vec::new(),
                successors: Vec::new(),
                reachable: false,
            };
        }
        current.insts.push(*inst);
    }
    blocks.push(current);
    blocks
}

fn build_cfg(blocks: &mut [BasicBlock]) {
    let addr_to_block: BTreeMap<usize, usize> = blocks
        .iter()
        .enumerate()
        .map(|(id, b)| (b.start_addr, id))
        .collect();

    for id in 0..blocks.len() {
        let mut successors = Vec::new();
        let mut falls_through = true;

        if let Some(last) = blocks[id].insts.last() {
            match last.op {
                Op::Jmp => {
                    falls_through = false;
                    if let Some(&target) = addr_to_block.get(&(last.a.max(0) as usize)) {
                        successors.push(target);
                    }
                }
                Op::Jpc => {
                    if let Some(&target) = addr_to_block.get(&(last.a.max(0) as usize)) {
                        successors.push(target);
                    }
                }
                Op::Opr if last.a == Opr::Ret as i32 => falls_through = false,
                _ => {}
            }
        }

        // A call transfers control to its target; the code after it is
        // reached again on return.
        for inst in &blocks[id].insts {
            if inst.op == Op::Cal {
                if let Some(&target) = addr_to_block.get(&(inst.a.max(0) as usize)) {
                    successors.push(target);
                }
            }
        }

        if falls_through && id + 1 < blocks.len() {
            successors.push(id + 1);
        }

        blocks[id].successors = successors;
    }
}

fn mark_reachable(blocks: &mut [BasicBlock], start: usize) {
    if start >= blocks.len() {
        return;
    }
    let mut queue = vec![start];
    blocks[start].reachable = true;

    while let Some(id) = queue.pop() {
        let successors = blocks[id].successors.clone();
        for succ in successors {
            if succ < blocks.len() && !blocks[succ].reachable {
                blocks[succ].reachable = true;
                queue.push(succ);
            }
        }
    }
}

/// Fold `LIT a; LIT b; OPR` triples to a single `LIT`, repeating until
/// nothing changes. Division by a zero literal is left alone so the
/// runtime error still fires.
fn constant_folding(block: &mut BasicBlock) {
    loop {
        let insts = &block.insts;
        if insts.len() < 3 {
            return;
        }

        let mut folded = Vec::with_capacity(insts.len());
        let mut changed = false;
        let mut i = 0;

        while i < insts.len() {
            if i + 2 < insts.len()
                && insts[i].op == Op::Lit
                && insts[i + 1].op == Op::Lit
                && insts[i + 2].op == Op::Opr
            {
                let lhs = insts[i].a;
                let rhs = insts[i + 1].a;
                if let Some(result) = fold(lhs, rhs, insts[i + 2].a) {
                    folded.push(Inst::new(Op::Lit, 0, result, insts[i].line));
                    i += 3;
                    changed = true;
                    continue;
                }
            }
            folded.push(insts[i]);
            i += 1;
        }

        block.insts = folded;
        if !changed {
            return;
        }
    }
}

fn fold(lhs: i32, rhs: i32, opr: i32) -> Option<i32> {
    let opr = Opr::from_operand(opr)?;
    let result = match opr {
        Opr::Add => lhs.wrapping_add(rhs),
        Opr::Sub => lhs.wrapping_sub(rhs),
        Opr::Mul => lhs.wrapping_mul(rhs),
        Opr::Div => {
            if rhs == 0 {
                return None;
            }
            lhs.wrapping_div(rhs)
        }
        Opr::Eql => (lhs == rhs) as i32,
        Opr::Neq => (lhs != rhs) as i32,
        Opr::Lss => (lhs < rhs) as i32,
        Opr::Geq => (lhs >= rhs) as i32,
        Opr::Gtr => (lhs > rhs) as i32,
        Opr::Leq => (lhs <= rhs) as i32,
        _ => return None,
    };
    Some(result)
}

/// Remove arithmetic identities (`±0`, `×1`, `÷1`) and simplify
/// branches on literal conditions.
fn strength_reduction(block: &mut BasicBlock) {
    let insts = &block.insts;
    let mut reduced = Vec::with_capacity(insts.len());
    let mut i = 0;

    while i < insts.len() {
        if i + 1 < insts.len() && insts[i].op == Op::Lit {
            let value = insts[i].a;
            let next = insts[i + 1];

            if next.op == Op::Opr {
                let identity = (value == 0 && next.a == Opr::Add as i32)
                    || (value == 0 && next.a == Opr::Sub as i32)
                    || (value == 1 && next.a == Opr::Mul as i32)
                    || (value == 1 && next.a == Opr::Div as i32);
                if identity {
                    i += 2;
                    continue;
                }
            }

            if next.op == Op::Jpc {
                if value == 0 {
                    // Always false: the branch is unconditional.
                    reduced.push(Inst::new(Op::Jmp, next.l, next.a, next.line));
                } // Always true: the branch never fires; drop both.
                i += 2;
                continue;
            }
        }
        reduced.push(insts[i]);
        i += 1;
    }

    block.insts = reduced;
}

/// Emit reachable blocks in order, retargeting jumps and calls through
/// the old→new address map. Targets of dropped blocks are left as-is.
fn flatten(blocks: Vec<BasicBlock>) -> Vec<Inst> {
    let mut address_map = BTreeMap::new();
    let mut next_addr = 0;
    for block in blocks.iter().filter(|b| b.reachable) {
        address_map.insert(block.start_addr, next_addr);
        next_addr += block.insts.len();
    }

    let mut result = Vec::with_capacity(next_addr);
    for block in blocks.iter().filter(|b| b.reachable) {
        for inst in &block.insts {
            let mut inst = *inst;
            if matches!(inst.op, Op::Jmp | Op::Jpc | Op::Cal) {
                if let Some(&new_target) = address_map.get(&(inst.a.max(0) as usize)) {
                    inst.a = new_target as i32;
                }
            }
            result.push(inst);
        }
    }
    result
}

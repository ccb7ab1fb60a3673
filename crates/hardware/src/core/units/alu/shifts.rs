//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA). The shift amount is the low five bits of the
//! second operand; the remaining bits are ignored.

use super::AluOp;
use crate::common::Word;
use crate::common::constants::SHAMT_MASK;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a shift variant).
/// * `a`  - The value to be shifted.
/// * `b`  - The shift amount (low 5 bits used).
///
/// # Returns
///
/// The shifted word. Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: Word, b: Word) -> Word {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << shamt,
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as Word,
        _ => 0,
    }
}

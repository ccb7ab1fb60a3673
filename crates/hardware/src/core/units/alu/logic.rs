//! ALU logical and comparison operations.
//!
//! Implements bitwise OR, AND, XOR, and set-less-than in both signed
//! (two's complement) and unsigned flavours. Comparisons produce 0 or 1.

use super::AluOp;
use crate::common::Word;

/// Executes a logical or comparison operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic/comparison variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The result word. Returns `0` for non-logic opcodes.
pub fn execute(op: AluOp, a: Word, b: Word) -> Word {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => ((a as i32) < (b as i32)) as Word,
        AluOp::Sltu => (a < b) as Word,
        _ => 0,
    }
}

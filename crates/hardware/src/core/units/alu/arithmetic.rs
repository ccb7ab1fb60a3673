//! ALU arithmetic operations.
//!
//! Addition and subtraction on 32-bit words. Both wrap modulo 2^32; carries and
//! borrows out of bit 31 are discarded.

use super::AluOp;
use crate::common::Word;

/// Executes an arithmetic operation.
///
/// Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: Word, b: Word) -> Word {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => 0,
    }
}

//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU evaluated by every integer
//! station once both of its operands are loaded. All arithmetic wraps modulo
//! 2^32; there are no flags, traps, or multi-cycle operations.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Sltu, Slt
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt, sltu).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use std::fmt;

use crate::common::Word;

/// ALU operation selected by a station's `operation` input.
///
/// The discriminant is the operation's encoding on the station's opcode lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AluOp {
    /// `a + b`
    #[default]
    Add = 0,
    /// `a - b`
    Sub = 1,
    /// `a | b`
    Or = 2,
    /// `a & b`
    And = 3,
    /// `a ^ b`
    Xor = 4,
    /// `a << (b & 31)`
    Sll = 5,
    /// Logical `a >> (b & 31)`
    Srl = 6,
    /// Arithmetic `a >> (b & 31)`
    Sra = 7,
    /// `1` if `a < b` unsigned, else `0`
    Sltu = 8,
    /// `1` if `a < b` signed, else `0`
    Slt = 9,
}

impl AluOp {
    /// Every operation, in encoding order.
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Sub,
        Self::Or,
        Self::And,
        Self::Xor,
        Self::Sll,
        Self::Srl,
        Self::Sra,
        Self::Sltu,
        Self::Slt,
    ];

    /// Decodes an opcode; returns `None` for encodings 10 and above.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Returns the opcode encoding.
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AluOp {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Or => "or",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Sltu => "sltu",
            Self::Slt => "slt",
        };
        f.write_str(name)
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift amount; only the low 5 bits are used)
    ///
    /// # Returns
    ///
    /// The 32-bit result of the operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdbsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 1, 36), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Sltu, -5_i32 as u32, 10), 0);
    /// ```
    pub fn execute(op: AluOp, a: Word, b: Word) -> Word {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}

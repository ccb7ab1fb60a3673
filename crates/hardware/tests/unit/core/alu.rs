//! ALU opcode table tests.

use cdbsim_core::core::units::alu::{Alu, AluOp};
use rstest::rstest;

#[rstest]
#[case(AluOp::Add, 20, 40, 60)]
#[case(AluOp::Add, 0xFFFF_FFFF, 2, 1)]
#[case(AluOp::Sub, 20, 40, 20_u32.wrapping_sub(40))]
#[case(AluOp::Sub, 0, 1, 0xFFFF_FFFF)]
#[case(AluOp::Or, 0xFF0, 0x0FF, 0xFFF)]
#[case(AluOp::And, 0xFF0, 0x0FF, 0x0F0)]
#[case(AluOp::Xor, 0xFF0, 0x0FF, 0xF0F)]
#[case(AluOp::Sll, 0xF, 5, 0x1E0)]
#[case(AluOp::Sll, 1, 33, 2)]
#[case(AluOp::Srl, 0xF, 5, 0)]
#[case(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case(AluOp::Sra, 0xFFFF_FFFF, 5, 0xFFFF_FFFF)]
#[case(AluOp::Sra, 0x8000_0000, 4, 0xF800_0000)]
#[case(AluOp::Sra, 0x4000_0000, 4, 0x0400_0000)]
#[case(AluOp::Sltu, 0xFFFF_FFFF, 5, 0)]
#[case(AluOp::Sltu, 5, 0xFFFF_FFFF, 1)]
#[case(AluOp::Slt, 0xFFFF_FFFF, 5, 1)]
#[case(AluOp::Slt, 5, 0xFFFF_FFFF, 0)]
#[case(AluOp::Slt, 5, 5, 0)]
fn opcode_table(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected, "{op} {a:#x}, {b:#x}");
}

#[rstest]
#[case(0, AluOp::Add)]
#[case(1, AluOp::Sub)]
#[case(2, AluOp::Or)]
#[case(3, AluOp::And)]
#[case(4, AluOp::Xor)]
#[case(5, AluOp::Sll)]
#[case(6, AluOp::Srl)]
#[case(7, AluOp::Sra)]
#[case(8, AluOp::Sltu)]
#[case(9, AluOp::Slt)]
fn opcode_encoding(#[case] code: u8, #[case] op: AluOp) {
    assert_eq!(AluOp::try_from(code), Ok(op));
    assert_eq!(op.code(), code);
}

#[test]
fn shift_amount_uses_low_five_bits_only() {
    for op in [AluOp::Sll, AluOp::Srl, AluOp::Sra] {
        assert_eq!(Alu::execute(op, 0x1234_5678, 0xFFFF_FFE0), 0x1234_5678);
    }
}

//! Built-in GCN (Southern Islands) tables.
//!
//! Only SOP2 entries are encodable today; the other families are listed so
//! that their mnemonics resolve and are reported as unsupported.

use crate::instructions::{EncodingFamily, InstrDesc};
use crate::operand::{OperandKind, SimpleOperand};

use EncodingFamily::*;

/// SOP2 word: `0b10 << 30 | op << 23`.
pub const fn sop2(op: u32) -> u32 {
    (0b10 << 30) | ((op & 0x7F) << 23)
}

pub const fn sopk(op: u32) -> u32 {
    (0b1011 << 28) | ((op & 0x1F) << 23)
}

pub const fn sop1(op: u32) -> u32 {
    (0b1_0111_1101 << 23) | ((op & 0xFF) << 8)
}

pub const fn sopc(op: u32) -> u32 {
    (0b1_0111_1110 << 23) | ((op & 0x7F) << 16)
}

pub const fn sopp(op: u32) -> u32 {
    (0b1_0111_1111 << 23) | ((op & 0x7F) << 16)
}

pub const fn vop2(op: u32) -> u32 {
    (op & 0x3F) << 25
}

pub const INSTRUCTIONS: &[InstrDesc] = &[
    InstrDesc::new("s_add_u32", Sop2, sop2(0)),
    InstrDesc::new("s_sub_u32", Sop2, sop2(1)),
    InstrDesc::new("s_add_i32", Sop2, sop2(2)),
    InstrDesc::new("s_sub_i32", Sop2, sop2(3)),
    InstrDesc::new("s_addc_u32", Sop2, sop2(4)),
    InstrDesc::new("s_subb_u32", Sop2, sop2(5)),
    InstrDesc::new("s_min_i32", Sop2, sop2(6)),
    InstrDesc::new("s_min_u32", Sop2, sop2(7)),
    InstrDesc::new("s_max_i32", Sop2, sop2(8)),
    InstrDesc::new("s_max_u32", Sop2, sop2(9)),
    InstrDesc::new("s_cselect_b32", Sop2, sop2(10)),
    InstrDesc::new("s_cselect_b64", Sop2, sop2(11)),
    InstrDesc::new("s_and_b32", Sop2, sop2(14)),
    InstrDesc::new("s_and_b64", Sop2, sop2(15)),
    InstrDesc::new("s_or_b32", Sop2, sop2(16)),
    InstrDesc::new("s_or_b64", Sop2, sop2(17)),
    InstrDesc::new("s_xor_b32", Sop2, sop2(18)),
    InstrDesc::new("s_xor_b64", Sop2, sop2(19)),
    InstrDesc::new("s_andn2_b32", Sop2, sop2(20)),
    InstrDesc::new("s_andn2_b64", Sop2, sop2(21)),
    InstrDesc::new("s_orn2_b32", Sop2, sop2(22)),
    InstrDesc::new("s_orn2_b64", Sop2, sop2(23)),
    InstrDesc::new("s_nand_b32", Sop2, sop2(24)),
    InstrDesc::new("s_nand_b64", Sop2, sop2(25)),
    InstrDesc::new("s_nor_b32", Sop2, sop2(26)),
    InstrDesc::new("s_nor_b64", Sop2, sop2(27)),
    InstrDesc::new("s_xnor_b32", Sop2, sop2(28)),
    InstrDesc::new("s_xnor_b64", Sop2, sop2(29)),
    InstrDesc::new("s_lshl_b32", Sop2, sop2(30)),
    InstrDesc::new("s_lshl_b64", Sop2, sop2(31)),
    InstrDesc::new("s_lshr_b32", Sop2, sop2(32)),
    InstrDesc::new("s_lshr_b64", Sop2, sop2(33)),
    InstrDesc::new("s_ashr_i32", Sop2, sop2(34)),
    InstrDesc::new("s_ashr_i64", Sop2, sop2(35)),
    InstrDesc::new("s_bfm_b32", Sop2, sop2(36)),
    InstrDesc::new("s_bfm_b64", Sop2, sop2(37)),
    InstrDesc::new("s_mul_i32", Sop2, sop2(38)),
    InstrDesc::new("s_bfe_u32", Sop2, sop2(39)),
    InstrDesc::new("s_bfe_i32", Sop2, sop2(40)),
    InstrDesc::new("s_bfe_u64", Sop2, sop2(41)),
    InstrDesc::new("s_bfe_i64", Sop2, sop2(42)),
    InstrDesc::new("s_cbranch_g_fork", Sop2, sop2(43)),
    InstrDesc::new("s_absdiff_i32", Sop2, sop2(44)),
    // Not encodable yet
    InstrDesc::new("s_movk_i32", Sopk, sopk(0)),
    InstrDesc::new("s_mov_b32", Sop1, sop1(3)),
    InstrDesc::new("s_mov_b64", Sop1, sop1(4)),
    InstrDesc::new("s_cmp_eq_i32", Sopc, sopc(0)),
    InstrDesc::new("s_nop", Sopp, sopp(0)),
    InstrDesc::new("s_endpgm", Sopp, sopp(1)),
    InstrDesc::new("s_waitcnt", Sopp, sopp(12)),
    InstrDesc::new("v_add_f32", Vop2, vop2(3)),
    InstrDesc::new("v_mul_f32", Vop2, vop2(8)),
];

/// Named operands, matched by prefix in this order.
pub const SIMPLE_OPERANDS: &[SimpleOperand] = &[
    SimpleOperand::new("vcc_lo", 106, OperandKind::SpecialRegister),
    SimpleOperand::new("vcc_hi", 107, OperandKind::SpecialRegister),
    SimpleOperand::new("tba_lo", 108, OperandKind::SpecialRegister),
    SimpleOperand::new("tba_hi", 109, OperandKind::SpecialRegister),
    SimpleOperand::new("tma_lo", 110, OperandKind::SpecialRegister),
    SimpleOperand::new("tma_hi", 111, OperandKind::SpecialRegister),
    SimpleOperand::new("m0", 124, OperandKind::SpecialRegister),
    SimpleOperand::new("exec_lo", 126, OperandKind::SpecialRegister),
    SimpleOperand::new("exec_hi", 127, OperandKind::SpecialRegister),
    SimpleOperand::new("0.5", 240, OperandKind::InlineFloat),
    SimpleOperand::new("-0.5", 241, OperandKind::InlineFloat),
    SimpleOperand::new("1.0", 242, OperandKind::InlineFloat),
    SimpleOperand::new("-1.0", 243, OperandKind::InlineFloat),
    SimpleOperand::new("2.0", 244, OperandKind::InlineFloat),
    SimpleOperand::new("-2.0", 245, OperandKind::InlineFloat),
    SimpleOperand::new("4.0", 246, OperandKind::InlineFloat),
    SimpleOperand::new("-4.0", 247, OperandKind::InlineFloat),
    SimpleOperand::new("vccz", 251, OperandKind::Condition),
    SimpleOperand::new("execz", 252, OperandKind::Condition),
    SimpleOperand::new("scc", 253, OperandKind::Condition),
];

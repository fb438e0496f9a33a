use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::instructions::{EncodingFamily, InstrDesc};
use crate::operand::OperandError;
use crate::tables::IsaTables;

/// A bit field inside the 32-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub lsb: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(name: &'static str, lsb: usize, width: usize) -> Self {
        Self { name, lsb, width }
    }

    /// Whether the field lies inside a 32-bit word.
    pub const fn in_word(&self) -> bool {
        self.width > 0 && self.width <= 32 && self.lsb <= 32 - self.width
    }

    pub const fn max(&self) -> u32 {
        ((1u64 << self.width) - 1) as u32
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("incorrect value for SDST operand '{0}'")]
    InvalidSdst(String),
    #[error("at most one literal constant can be used")]
    DuplicateLiteral,
    #[error("missing {0} operand")]
    MissingOperand(&'static str),
    #[error("unexpected trailing operand '{0}'")]
    TrailingOperand(String),
    #[error("{field}: {source}")]
    Operand {
        field: &'static str,
        #[source]
        source: OperandError,
    },
    #[error("{field} field (bit {lsb}, width {width}) lies outside the instruction word")]
    FieldOutOfWord {
        field: &'static str,
        lsb: usize,
        width: usize,
    },
    #[error("code {code:#x} does not fit the {width}-bit {field} field")]
    FieldOverflow {
        field: &'static str,
        width: usize,
        code: u32,
    },
}

/// Result of encoding one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoded {
    pub word: u32,
    pub literal: Option<u32>,
}

impl Encoded {
    /// Instruction word first, then the literal if one is present.
    pub fn words(&self) -> impl Iterator<Item = u32> {
        std::iter::once(self.word).chain(self.literal)
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words().flat_map(u32::to_le_bytes).collect()
    }
}

/// Instruction word under construction plus the shared literal slot.
#[derive(Debug, Clone)]
pub struct OpcodeAccumulator {
    word: BitArray<u32, Lsb0>,
    literal: Option<u32>,
}

impl OpcodeAccumulator {
    pub fn new(base_opcode: u32) -> Self {
        Self {
            word: BitArray::new(base_opcode),
            literal: None,
        }
    }

    /// ORs `code` into `field`.
    pub fn merge(&mut self, field: Field, code: u32) -> Result<(), EncodeError> {
        if !field.in_word() {
            return Err(EncodeError::FieldOutOfWord {
                field: field.name,
                lsb: field.lsb,
                width: field.width,
            });
        }
        if code > field.max() {
            return Err(EncodeError::FieldOverflow {
                field: field.name,
                width: field.width,
                code,
            });
        }
        let bits = &mut self.word[field.lsb..field.lsb + field.width];
        let cur: u32 = bits.load_le();
        bits.store_le(cur | code);
        Ok(())
    }

    /// Claims the literal slot. An instruction carries at most one literal.
    pub fn set_literal(&mut self, value: u32) -> Result<(), EncodeError> {
        if self.literal.is_some() {
            return Err(EncodeError::DuplicateLiteral);
        }
        self.literal = Some(value);
        Ok(())
    }

    pub fn literal(&self) -> Option<u32> {
        self.literal
    }

    pub fn finish(self) -> Encoded {
        Encoded {
            word: self.word.into_inner(),
            literal: self.literal,
        }
    }
}

/// Family-specific operand packing.
pub trait Encoder {
    fn family(&self) -> EncodingFamily;
    fn encode(&self, tables: &IsaTables, instr: &InstrDesc, operands: &str) -> Result<Encoded, EncodeError>;
}

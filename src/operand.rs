//! Operand classification.
//!
//! A field is tried against the simple operand table first (plain prefix
//! match in table order), then as an SGPR (`s<N>`), a trap temporary
//! (`t<N>`), and finally as a number. Numbers in the inline ranges map to
//! dedicated codes; anything else becomes a 32-bit literal.

use std::borrow::Cow;

use num_traits::{Num, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::tables::OperandCodes;

/// Operand categories, ordered. Kinds before the SDST threshold are
/// register-class operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandKind {
    Sgpr,
    SpecialRegister,
    Ttmp,
    Zero,
    InlinePositive,
    InlineNegative,
    InlineFloat,
    Condition,
    Literal,
}

impl OperandKind {
    /// Whether this kind may be written as a scalar destination.
    pub fn is_register_class(self, sdst_threshold: OperandKind) -> bool {
        self < sdst_threshold
    }
}

/// Named operand matched by textual prefix (`vcc_lo`, `exec_hi`, `1.0`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleOperand {
    pub name: Cow<'static, str>,
    pub code: u32,
    pub kind: OperandKind,
}

impl SimpleOperand {
    pub const fn new(name: &'static str, code: u32, kind: OperandKind) -> Self {
        Self {
            name: Cow::Borrowed(name),
            code,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'t> {
    Simple(&'t SimpleOperand),
    Sgpr(u8),
    Ttmp(u8),
    Zero,
    /// Inline constant 1..=64.
    InlinePositive(u8),
    /// Inline constant -1..=-16, stored as its magnitude.
    InlineNegative(u8),
    Literal(u32),
}

impl Operand<'_> {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Simple(s) => s.kind,
            Operand::Sgpr(_) => OperandKind::Sgpr,
            Operand::Ttmp(_) => OperandKind::Ttmp,
            Operand::Zero => OperandKind::Zero,
            Operand::InlinePositive(_) => OperandKind::InlinePositive,
            Operand::InlineNegative(_) => OperandKind::InlineNegative,
            Operand::Literal(_) => OperandKind::Literal,
        }
    }
}

/// A classified operand and its (unshifted) field code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOperand<'t> {
    pub operand: Operand<'t>,
    pub code: u32,
}

impl ParsedOperand<'_> {
    pub fn kind(&self) -> OperandKind {
        self.operand.kind()
    }

    pub fn literal(&self) -> Option<u32> {
        match self.operand {
            Operand::Literal(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Sgpr,
    Ttmp,
    Literal,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ValueKind::Sgpr => "SGPR",
            ValueKind::Ttmp => "TTMP",
            ValueKind::Literal => "literal",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("parsing operand ({kind} value) '{text}'")]
    Malformed { kind: ValueKind, text: String },
    #[error("invalid SGPR number {0}")]
    InvalidSgpr(i64),
    #[error("invalid TTMP number {0}")]
    InvalidTtmp(i64),
    #[error("literal value {0} does not fit in 32 bits")]
    LiteralRange(i64),
    #[error("operand code {base} + {offset} overflows")]
    CodeOverflow { base: u32, offset: u32 },
}

fn offset_code(base: u32, offset: u32) -> Result<u32, OperandError> {
    base.checked_add(offset).ok_or(OperandError::CodeOverflow { base, offset })
}

/// Parses all of `digits` in `radix`, or nothing.
fn parse_int<T: Num>(digits: &str, radix: u32) -> Option<T> {
    if digits.is_empty() {
        return None;
    }
    T::from_str_radix(digits, radix).ok()
}

fn register_index(text: &str, kind: ValueKind) -> Result<i64, OperandError> {
    parse_int::<i64>(&text[1..], 10).ok_or_else(|| OperandError::Malformed {
        kind,
        text: text.to_string(),
    })
}

pub fn classify<'t>(
    simple: &'t [SimpleOperand],
    codes: &OperandCodes,
    text: &str,
) -> Result<ParsedOperand<'t>, OperandError> {
    if let Some(s) = simple.iter().find(|s| text.starts_with(s.name.as_ref())) {
        return Ok(ParsedOperand { operand: Operand::Simple(s), code: s.code });
    }

    match text.as_bytes().first().map(u8::to_ascii_lowercase) {
        Some(b's') => {
            let n = register_index(text, ValueKind::Sgpr)?;
            let index = n
                .to_u8()
                .filter(|&i| u32::from(i) <= codes.sgpr_max)
                .ok_or(OperandError::InvalidSgpr(n))?;
            Ok(ParsedOperand {
                operand: Operand::Sgpr(index),
                code: offset_code(codes.sgpr_base, u32::from(index))?,
            })
        }
        Some(b't') => {
            let n = register_index(text, ValueKind::Ttmp)?;
            let index = n
                .to_u8()
                .filter(|&i| u32::from(i) <= codes.ttmp_max)
                .ok_or(OperandError::InvalidTtmp(n))?;
            Ok(ParsedOperand {
                operand: Operand::Ttmp(index),
                code: offset_code(codes.ttmp_base, u32::from(index))?,
            })
        }
        _ => classify_number(codes, text),
    }
}

fn classify_number<'t>(codes: &OperandCodes, text: &str) -> Result<ParsedOperand<'t>, OperandError> {
    let value = match text.strip_prefix("0x") {
        Some(hex) => parse_int::<i64>(hex, 16),
        None => parse_int::<i64>(text, 10),
    }
    .ok_or_else(|| OperandError::Malformed {
        kind: ValueKind::Literal,
        text: text.to_string(),
    })?;

    let parsed = match value {
        0 => ParsedOperand { operand: Operand::Zero, code: codes.zero },
        1..=64 => ParsedOperand {
            operand: Operand::InlinePositive(value as u8),
            code: offset_code(codes.inline_positive_base, value as u32 - 1)?,
        },
        -16..=-1 => ParsedOperand {
            operand: Operand::InlineNegative((-value) as u8),
            code: offset_code(codes.inline_negative_base, (-value) as u32 - 1)?,
        },
        _ => {
            let bits = value
                .to_u32()
                .or_else(|| value.to_i32().map(|v| v as u32))
                .ok_or(OperandError::LiteralRange(value))?;
            ParsedOperand { operand: Operand::Literal(bits), code: codes.literal }
        }
    };
    Ok(parsed)
}

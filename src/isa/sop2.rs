use tracing::trace;

use crate::encoder::{EncodeError, Encoded, Encoder, Field, OpcodeAccumulator};
use crate::instructions::{EncodingFamily, InstrDesc};
use crate::operand::{classify, ParsedOperand};
use crate::tables::IsaTables;
use crate::tokenizer::{fields, next_field, trim_line_end, FIELD_DELIMITERS};

pub const SDST: Field = Field::new("SDST", 16, 7);
pub const SSRC1: Field = Field::new("SSRC1", 8, 8);
pub const SSRC0: Field = Field::new("SSRC0", 0, 8);

/// Two-source scalar ALU encoding:
///
/// `MAGIC (2) | OP (7) | SDST (7) | SSRC1 (8) | SSRC0 (8) | [LITERAL (32)]`
pub struct Sop2Encoder {
    /// Reject fields after the third operand instead of ignoring them.
    pub strict: bool,
}

impl Sop2Encoder {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

fn take_operand<'a>(rest: &mut &'a str, field: Field) -> Result<&'a str, EncodeError> {
    let (text, tail) = next_field(*rest, FIELD_DELIMITERS).ok_or(EncodeError::MissingOperand(field.name))?;
    *rest = tail;
    let text = trim_line_end(text);
    if text.is_empty() {
        return Err(EncodeError::MissingOperand(field.name));
    }
    Ok(text)
}

fn parse<'t>(tables: &'t IsaTables, text: &str, field: Field) -> Result<ParsedOperand<'t>, EncodeError> {
    classify(&tables.operands, &tables.codes, text).map_err(|source| EncodeError::Operand { field: field.name, source })
}

impl Encoder for Sop2Encoder {
    fn family(&self) -> EncodingFamily {
        EncodingFamily::Sop2
    }

    fn encode(&self, tables: &IsaTables, instr: &InstrDesc, operands: &str) -> Result<Encoded, EncodeError> {
        let mut rest = operands;
        let dst = take_operand(&mut rest, SDST)?;
        let src1 = take_operand(&mut rest, SSRC1)?;
        let src0 = take_operand(&mut rest, SSRC0)?;

        if self.strict {
            if let Some(extra) = fields(rest).map(trim_line_end).find(|f| !f.is_empty()) {
                return Err(EncodeError::TrailingOperand(extra.to_string()));
            }
        }

        let mut acc = OpcodeAccumulator::new(instr.base_opcode);

        let op = parse(tables, dst, SDST)?;
        if !op.kind().is_register_class(tables.codes.sdst_threshold) {
            return Err(EncodeError::InvalidSdst(dst.to_string()));
        }
        acc.merge(SDST, op.code)?;

        for (text, field) in [(src1, SSRC1), (src0, SSRC0)] {
            let op = parse(tables, text, field)?;
            if let Some(value) = op.literal() {
                acc.set_literal(value)?;
            }
            acc.merge(field, op.code)?;
        }

        let out = acc.finish();
        trace!(mnemonic = %instr.mnemonic, word = format_args!("{:#010x}", out.word), "sop2");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::gcn::sop2;
    use crate::operand::{OperandError, ValueKind};

    fn add() -> InstrDesc {
        InstrDesc::new("s_add_u32", EncodingFamily::Sop2, sop2(0))
    }

    fn enc(operands: &str) -> Result<Encoded, EncodeError> {
        Sop2Encoder::new(true).encode(&IsaTables::default(), &add(), operands)
    }

    #[test]
    fn register_and_inline() {
        let e = enc(" s5, s3, 42\n").unwrap();
        assert_eq!(e, Encoded { word: 0x8005_03AA, literal: None });
    }

    #[test]
    fn source_literal() {
        let e = enc("s5, s3, 1000\n").unwrap();
        assert_eq!(e, Encoded { word: 0x8005_03FF, literal: Some(0x3E8) });
    }

    #[test]
    fn missing_operand() {
        assert_eq!(enc("s5, s3"), Err(EncodeError::MissingOperand("SSRC0")));
        assert_eq!(enc("s5, s3, \n"), Err(EncodeError::MissingOperand("SSRC0")));
        assert_eq!(enc(""), Err(EncodeError::MissingOperand("SDST")));
    }

    #[test]
    fn trailing_whitespace_is_not_an_operand() {
        assert!(enc("s5, s3, s1 \t\n").is_ok());
    }

    #[test]
    fn trailing_operand_strict_and_lenient() {
        assert_eq!(enc("s5, s3, s1, s2"), Err(EncodeError::TrailingOperand("s2".into())));
        let e = Sop2Encoder::new(false).encode(&IsaTables::default(), &add(), "s5, s3, s1, s2").unwrap();
        assert_eq!(e.word, 0x8005_0301);
    }

    #[test]
    fn operand_errors_name_the_field() {
        let err = enc("s5, sXYZ, s1").unwrap_err();
        assert_eq!(
            err,
            EncodeError::Operand {
                field: "SSRC1",
                source: OperandError::Malformed { kind: ValueKind::Sgpr, text: "sXYZ".into() },
            }
        );
    }
}

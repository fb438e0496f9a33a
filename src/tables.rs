use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::instructions::InstrDesc;
use crate::isa::gcn;
use crate::operand::{OperandKind, SimpleOperand};

/// Fixed codes and limits used by operand classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperandCodes {
    pub sgpr_base: u32,
    pub sgpr_max: u32,
    pub ttmp_base: u32,
    pub ttmp_max: u32,
    pub zero: u32,
    pub inline_positive_base: u32,
    pub inline_negative_base: u32,
    /// Placeholder code written when the value follows as a literal word.
    pub literal: u32,
    /// First kind that can no longer be used as a scalar destination.
    pub sdst_threshold: OperandKind,
}

impl OperandCodes {
    /// Checks that every code these bases produce fits the scalar operand
    /// fields: 7 bits for register classes, 8 bits for sources.
    pub fn validate(&self) -> Result<(), TableError> {
        const DST_MAX: u64 = 0x7F;
        const SRC_MAX: u64 = 0xFF;
        let highest = [
            ("sgpr_base + sgpr_max", u64::from(self.sgpr_base) + u64::from(self.sgpr_max), DST_MAX),
            ("ttmp_base + ttmp_max", u64::from(self.ttmp_base) + u64::from(self.ttmp_max), DST_MAX),
            ("zero", u64::from(self.zero), SRC_MAX),
            ("inline_positive_base + 63", u64::from(self.inline_positive_base) + 63, SRC_MAX),
            ("inline_negative_base + 15", u64::from(self.inline_negative_base) + 15, SRC_MAX),
            ("literal", u64::from(self.literal), SRC_MAX),
        ];
        for (name, value, max) in highest {
            if value > max {
                return Err(TableError::CodeRange { name, value, max });
            }
        }
        Ok(())
    }
}

impl Default for OperandCodes {
    fn default() -> Self {
        Self {
            sgpr_base: 0,
            sgpr_max: 103,
            ttmp_base: 112,
            ttmp_max: 11,
            zero: 128,
            inline_positive_base: 129,
            inline_negative_base: 193,
            literal: 255,
            sdst_threshold: OperandKind::Zero,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("reading tables from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate mnemonic '{0}'")]
    DuplicateMnemonic(String),
    #[error("operand code {name} reaches {value}, above the {max} its field can hold")]
    CodeRange { name: &'static str, value: u64, max: u64 },
}

/// The instruction and operand tables the assembler runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsaTables {
    pub instructions: Cow<'static, [InstrDesc]>,
    pub operands: Cow<'static, [SimpleOperand]>,
    pub codes: OperandCodes,
}

impl Default for IsaTables {
    fn default() -> Self {
        Self {
            instructions: Cow::Borrowed(gcn::INSTRUCTIONS),
            operands: Cow::Borrowed(gcn::SIMPLE_OPERANDS),
            codes: OperandCodes::default(),
        }
    }
}

impl IsaTables {
    /// Parses and validates a JSON table set. Sections left out fall back to
    /// the built-in GCN tables.
    pub fn from_json(text: &str) -> Result<Self, TableError> {
        let tables: IsaTables = serde_json::from_str(text)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Rejects duplicate mnemonics and operand codes that overflow their
    /// fields. Shadowed operand prefixes are only logged: table order decides
    /// which entry matches.
    pub fn validate(&self) -> Result<(), TableError> {
        self.codes.validate()?;
        let mut seen = HashSet::new();
        for d in self.instructions.iter() {
            if !seen.insert(d.mnemonic.as_ref()) {
                return Err(TableError::DuplicateMnemonic(d.mnemonic.to_string()));
            }
        }
        for (earlier, later) in self.shadowed_prefixes() {
            warn!(
                shadowing = %self.operands[earlier].name,
                shadowed = %self.operands[later].name,
                "operand prefix is shadowed by an earlier entry"
            );
        }
        Ok(())
    }

    /// Pairs `(earlier, later)` of operand entries where the earlier name is
    /// a prefix of the later one, so the later entry can never match.
    pub fn shadowed_prefixes(&self) -> Vec<(usize, usize)> {
        let ops = &self.operands;
        let mut out = Vec::new();
        for (i, a) in ops.iter().enumerate() {
            for (j, b) in ops.iter().enumerate().skip(i + 1) {
                if b.name.starts_with(a.name.as_ref()) {
                    out.push((i, j));
                }
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

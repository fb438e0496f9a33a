use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::encoder::{EncodeError, Encoded, Encoder};
use crate::instructions::{resolve, EncodingFamily, InstrDesc};
use crate::isa::sop2::Sop2Encoder;
use crate::tables::IsaTables;
use crate::tokenizer::{next_field, strip_comment, trim_line_end, FIELD_DELIMITERS};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Stop the whole run at the first operand or encoding error instead of
    /// reporting it and moving on to the next line.
    pub stop_on_error: bool,
    /// Reject operand fields beyond the ones the encoding takes.
    pub strict_operands: bool,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            stop_on_error: false,
            strict_operands: true,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("unrecognized instruction '{0}'")]
    Unrecognized(String),
    #[error("unsupported encoding type for instruction '{0}'")]
    Unsupported(String),
    #[error("{mnemonic}: {source}")]
    Encode {
        mnemonic: String,
        #[source]
        source: EncodeError,
    },
}

impl LineError {
    /// Unknown mnemonics and unsupported families only skip their line;
    /// anything else is a malformed instruction.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LineError::Unrecognized(_) | LineError::Unsupported(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembled {
    pub mnemonic: String,
    #[serde(flatten)]
    pub encoded: Encoded,
}

/// Outcome of one source line that held an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// 1-based.
    pub line: usize,
    pub result: Result<Assembled, LineError>,
}

pub struct Assembler {
    tables: IsaTables,
    cfg: AsmConfig,
    encoders: Vec<Box<dyn Encoder>>,
}

impl Assembler {
    pub fn new(tables: IsaTables, cfg: AsmConfig) -> Self {
        Self {
            tables,
            cfg,
            encoders: vec![Box::new(Sop2Encoder::new(cfg.strict_operands))],
        }
    }

    /// Registers an encoder for another family. A later registration for the
    /// same family takes precedence.
    pub fn with_encoder(mut self, enc: Box<dyn Encoder>) -> Self {
        self.encoders.insert(0, enc);
        self
    }

    pub fn tables(&self) -> &IsaTables {
        &self.tables
    }

    pub fn config(&self) -> &AsmConfig {
        &self.cfg
    }

    pub fn resolve(&self, mnemonic: &str) -> Option<&InstrDesc> {
        resolve(&self.tables.instructions, mnemonic)
    }

    fn encoder_for(&self, family: EncodingFamily) -> Option<&dyn Encoder> {
        self.encoders.iter().find(|e| e.family() == family).map(|e| e.as_ref())
    }

    /// Assembles a single source line. Blank and comment-only lines give
    /// `Ok(None)`.
    pub fn assemble_line(&self, line: &str) -> Result<Option<Assembled>, LineError> {
        let code = strip_comment(line);
        let Some((token, operands)) = next_field(code, FIELD_DELIMITERS) else {
            return Ok(None);
        };
        let token = trim_line_end(token);
        if token.is_empty() {
            return Ok(None);
        }

        let instr = self
            .resolve(token)
            .ok_or_else(|| LineError::Unrecognized(token.to_string()))?;
        let enc = self
            .encoder_for(instr.family)
            .ok_or_else(|| LineError::Unsupported(instr.mnemonic.to_string()))?;

        let encoded = enc
            .encode(&self.tables, instr, operands)
            .map_err(|source| LineError::Encode {
                mnemonic: instr.mnemonic.to_string(),
                source,
            })?;
        debug!(
            mnemonic = %instr.mnemonic,
            word = format_args!("{:#010x}", encoded.word),
            literal = encoded.literal.is_some(),
            "encoded"
        );
        Ok(Some(Assembled {
            mnemonic: instr.mnemonic.to_string(),
            encoded,
        }))
    }

    /// Assembles every line of `text` in order. Lines without an instruction
    /// produce no report.
    pub fn assemble_source(&self, text: &str) -> Vec<LineReport> {
        let mut out = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let result = match self.assemble_line(line) {
                Ok(None) => continue,
                Ok(Some(a)) => Ok(a),
                Err(e) => Err(e),
            };
            let stop = match &result {
                Err(e) if e.is_recoverable() => {
                    warn!(line = i + 1, "{e}");
                    false
                }
                Err(e) => {
                    error!(line = i + 1, "{e}");
                    self.cfg.stop_on_error
                }
                Ok(_) => false,
            };
            out.push(LineReport { line: i + 1, result });
            if stop {
                break;
            }
        }
        out
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(IsaTables::default(), AsmConfig::default())
    }
}

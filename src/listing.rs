use serde::Serialize;

use crate::assembler::{Assembled, LineReport};

/// `s_add_u32 \t0x800503ff 0x000003e8`
pub fn fmt_assembled(a: &Assembled) -> String {
    let mut s = format!("{} \t{:#010x}", a.mnemonic, a.encoded.word);
    if let Some(lit) = a.encoded.literal {
        s.push_str(&format!(" {lit:#010x}"));
    }
    s
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingRecord<'a> {
    pub line: usize,
    pub mnemonic: &'a str,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl<'a> ListingRecord<'a> {
    pub fn new(line: usize, a: &'a Assembled) -> Self {
        Self {
            line,
            mnemonic: &a.mnemonic,
            word: format!("{:#010x}", a.encoded.word),
            literal: a.encoded.literal.map(|v| format!("{v:#010x}")),
        }
    }
}

/// Successful lines of `reports` in order.
pub fn records(reports: &[LineReport]) -> Vec<ListingRecord<'_>> {
    reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok().map(|a| ListingRecord::new(r.line, a)))
        .collect()
}

/// Instruction words and literals of every successful line, little-endian.
pub fn to_binary(reports: &[LineReport]) -> Vec<u8> {
    reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .flat_map(|a| a.encoded.to_le_bytes())
        .collect()
}

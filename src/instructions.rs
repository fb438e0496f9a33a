use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Instruction encoding families of the GCN ISA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFamily {
    Sop2,
    Sopk,
    Sop1,
    Sopc,
    Sopp,
    Smrd,
    Vop2,
    Vop1,
    Vopc,
    Vop3,
    Vintrp,
    Ds,
    Mubuf,
    Mtbuf,
    Mimg,
    Exp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrDesc {
    pub mnemonic: Cow<'static, str>,
    pub family: EncodingFamily,
    /// Opcode bits already placed at their position in the word.
    pub base_opcode: u32,
}

impl InstrDesc {
    pub const fn new(mnemonic: &'static str, family: EncodingFamily, base_opcode: u32) -> Self {
        Self {
            mnemonic: Cow::Borrowed(mnemonic),
            family,
            base_opcode,
        }
    }
}

/// Looks up `mnemonic` in `table`. Case-sensitive; the first entry wins.
pub fn resolve<'t>(table: &'t [InstrDesc], mnemonic: &str) -> Option<&'t InstrDesc> {
    table.iter().find(|d| d.mnemonic == mnemonic)
}

pub mod assembler;
pub mod encoder;
pub mod instructions;
pub mod listing;
pub mod operand;
pub mod tables;
pub mod tokenizer;

pub mod isa {
    pub mod gcn; // Southern Islands tables
    pub mod sop2;
}

pub use assembler::{AsmConfig, Assembled, Assembler, LineError, LineReport};
pub use encoder::{EncodeError, Encoded, Encoder};
pub use operand::{classify, Operand, OperandError, OperandKind, ParsedOperand};
pub use tables::{IsaTables, OperandCodes, TableError};

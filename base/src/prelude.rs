//! Convenience re-exports for the types almost every user of this
//! crate needs.

pub use crate::instruction::{Instruction, InstructionKind, Opcode};
pub use crate::types::{Address, Word, ADDRESS_MASK, MEMORY_SIZE, RESERVED_LIMIT};

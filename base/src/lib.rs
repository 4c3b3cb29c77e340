//! Shared definitions for the M16 teaching machine.
//!
//! Everything that the assembler and the simulator must agree on
//! bit-for-bit lives here: the 12-bit address space, the 16-bit
//! instruction word and its field layout, and the canonical opcode
//! table.  Neither side is allowed to carry a private copy of any of
//! these.

pub mod instruction;
pub mod prelude;
pub mod types;

pub use instruction::{disassemble, Instruction, InstructionKind, Opcode};
pub use types::{Address, Word, ADDRESS_MASK, MEMORY_SIZE, RESERVED_LIMIT};

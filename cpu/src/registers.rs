//! The machine's register file.
//!
//! Four general purpose registers, three index registers (index 0 is
//! the distinguished "no indexing" value and always reads as zero),
//! the program counter and memory address register (12 bits each),
//! the memory buffer and instruction registers (16 bits), the 4-bit
//! condition code register and the 4-bit machine fault register.
//!
//! All 16-bit registers silently mask assigned values to 16 bits and
//! the 12-bit ones to 12, matching the hardware's missing wires.
use std::fmt::{self, Display, Formatter};

use base::prelude::*;

use crate::fault::Fault;

/// Condition-code bit positions.  The ordering is fixed by the JCC
/// instruction, which tests bit `3 - cc`: condition index 0 names
/// OVERFLOW and condition index 3 names EQUALORNOT.
pub const CC_OVERFLOW: u8 = 0b1000;
pub const CC_UNDERFLOW: u8 = 0b0100;
pub const CC_DIVZERO: u8 = 0b0010;
pub const CC_EQUAL: u8 = 0b0001;

#[derive(Debug, Clone)]
pub struct RegisterFile {
    gpr: [Word; 4],
    ixr: [Word; 4],
    pub pc: Address,
    pub mar: Address,
    pub mbr: Word,
    pub ir: Word,
    cc: u8,
    mfr: u8,
}

impl RegisterFile {
    pub fn new() -> RegisterFile {
        RegisterFile {
            gpr: [0; 4],
            ixr: [0; 4],
            pc: Address::ZERO,
            mar: Address::ZERO,
            mbr: 0,
            ir: 0,
            cc: 0,
            mfr: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = RegisterFile::new();
    }

    pub fn gpr(&self, r: usize) -> Word {
        self.gpr[r & 0o3]
    }

    pub fn set_gpr(&mut self, r: usize, value: Word) {
        self.gpr[r & 0o3] = value;
    }

    /// Index register read; index 0 always yields zero.
    pub fn ixr(&self, x: usize) -> Word {
        debug_assert_eq!(self.ixr[0], 0);
        self.ixr[x & 0o3]
    }

    /// Index register write; writes to index 0 are discarded so that
    /// IXR0 keeps meaning "no indexing".
    pub fn set_ixr(&mut self, x: usize, value: Word) {
        let x = x & 0o3;
        if x != 0 {
            self.ixr[x] = value;
        }
    }

    pub fn cc(&self) -> u8 {
        self.cc
    }

    pub fn cc_bit(&self, bit: u8) -> bool {
        self.cc & bit != 0
    }

    pub fn set_cc_bit(&mut self, bit: u8, on: bool) {
        if on {
            self.cc |= bit;
        } else {
            self.cc &= !bit;
        }
        self.cc &= 0b1111;
    }

    pub fn mfr(&self) -> u8 {
        self.mfr
    }

    /// Record a machine fault.  Fault bits compose by OR; the
    /// execution loop halts at the first non-zero MFR, so normally
    /// only one is ever observed.
    pub fn record_fault(&mut self, fault: &Fault) {
        self.mfr |= fault.code();
    }
}

impl Default for RegisterFile {
    fn default() -> RegisterFile {
        RegisterFile::new()
    }
}

impl Display for RegisterFile {
    /// Front-panel style dump, all values in octal.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        for r in 0..4 {
            writeln!(f, "GPR{r} {:06o}", self.gpr[r])?;
        }
        for x in 1..4 {
            writeln!(f, "IXR{x} {:06o}", self.ixr[x])?;
        }
        writeln!(f, "PC   {:06o}", self.pc.get())?;
        writeln!(f, "MAR  {:06o}", self.mar.get())?;
        writeln!(f, "MBR  {:06o}", self.mbr)?;
        writeln!(f, "IR   {:06o}", self.ir)?;
        writeln!(f, "CC   {:04b}", self.cc)?;
        writeln!(f, "MFR  {:04b}", self.mfr)
    }
}

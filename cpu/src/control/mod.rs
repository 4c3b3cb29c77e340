//! The control unit: fetch, decode, execute.
//!
//! One call to [`Machine::step`] performs one full instruction cycle:
//!
//! 1. MAR ← PC, IR ← mem\[PC\] (through the cache), MBR ← IR.
//! 2. Decode the opcode field; an unknown code is a machine fault.
//! 3. Execute, dispatching to the op modules below.
//! 4. Commit the PC change the instruction asked for, or PC + 1.
//!
//! A fault leaves PC where it was, records the fault bit in MFR, and
//! emits one diagnostic line; the loop refuses further steps while
//! MFR is non-zero.  The only suspension point is IN on an empty
//! keyboard buffer, which returns control to the driver with the
//! machine otherwise untouched.
use tracing::{event, Level};

use base::instruction::disassemble;
use base::prelude::*;

use crate::fault::Fault;
use crate::machine::{Machine, StepOutcome};

mod op_arith;
mod op_io;
mod op_jump;
mod op_loadstore;
mod op_shift;
mod trap;

#[cfg(test)]
mod tests;

/// How an instruction wants the program counter updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// PC ← PC + 1.
    Next,
    /// PC ← the given address (jumps and subroutine linkage).
    Jump(Address),
    /// HLT: leave PC alone and stop the loop.
    Halt,
    /// IN with nothing to read: leave PC alone and suspend.
    Await,
}

/// Check a data address against the reserved range and the memory
/// bound.  The raw (un-truncated) sum is what gets checked, so an
/// indexed address that overflows the 12-bit space is reported as
/// out of bounds rather than silently wrapped.
pub(crate) fn check_data_address(ea: u32) -> Result<Address, Fault> {
    if ea <= u32::from(RESERVED_LIMIT) {
        Err(Fault::ReservedMemory { addr: ea })
    } else if ea >= MEMORY_SIZE as u32 {
        Err(Fault::BeyondMemory { addr: ea })
    } else {
        Ok(Address::new(ea as u16))
    }
}

impl Machine {
    /// Execute one instruction.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        if self.regs.mfr() != 0 {
            return Ok(StepOutcome::Halted);
        }
        let pc = self.regs.pc;
        self.regs.mar = pc;
        match self.fetch_and_execute(pc) {
            Ok(Transition::Next) => {
                self.regs.pc = pc.successor();
                Ok(StepOutcome::Running)
            }
            Ok(Transition::Jump(target)) => {
                self.regs.pc = target;
                Ok(StepOutcome::Running)
            }
            Ok(Transition::Halt) => Ok(StepOutcome::Halted),
            Ok(Transition::Await) => Ok(StepOutcome::AwaitingInput),
            Err(fault) => {
                self.regs.record_fault(&fault);
                event!(
                    Level::ERROR,
                    "machine fault at PC {pc}: {fault} (MFR {:04b})",
                    self.regs.mfr()
                );
                Err(fault)
            }
        }
    }

    fn fetch_and_execute(&mut self, pc: Address) -> Result<Transition, Fault> {
        if pc.is_reserved() {
            return Err(Fault::ReservedMemory { addr: pc.into() });
        }
        let word = self.mem.read(pc)?;
        self.regs.ir = word;
        self.regs.mbr = word;
        self.execute(Instruction::from(word))
    }

    fn execute(&mut self, inst: Instruction) -> Result<Transition, Fault> {
        let opcode = inst.opcode().ok_or(Fault::IllegalOpcode {
            bits: inst.opcode_bits(),
        })?;
        if let Some(text) = disassemble(inst) {
            event!(Level::TRACE, "PC {}: {}", self.regs.pc, text);
        }
        match opcode {
            Opcode::Hlt => {
                event!(Level::INFO, "HLT instruction executed.");
                Ok(Transition::Halt)
            }
            Opcode::Ldr => op_loadstore::ldr(self, inst),
            Opcode::Str => op_loadstore::str(self, inst),
            Opcode::Lda => op_loadstore::lda(self, inst),
            Opcode::Ldx => op_loadstore::ldx(self, inst),
            Opcode::Stx => op_loadstore::stx(self, inst),
            Opcode::Amr => op_arith::amr(self, inst),
            Opcode::Smr => op_arith::smr(self, inst),
            Opcode::Air => op_arith::air(self, inst),
            Opcode::Sir => op_arith::sir(self, inst),
            Opcode::Add => op_arith::add(self, inst),
            Opcode::Sub => op_arith::sub(self, inst),
            Opcode::Mlt => op_arith::mlt(self, inst),
            Opcode::Dvd => op_arith::dvd(self, inst),
            Opcode::Trr => op_arith::trr(self, inst),
            Opcode::And => op_arith::and(self, inst),
            Opcode::Orr => op_arith::orr(self, inst),
            Opcode::Not => op_arith::not(self, inst),
            Opcode::Jz => op_jump::jz(self, inst),
            Opcode::Jne => op_jump::jne(self, inst),
            Opcode::Jcc => op_jump::jcc(self, inst),
            Opcode::Jma => op_jump::jma(self, inst),
            Opcode::Jsr => op_jump::jsr(self, inst),
            Opcode::Rfs => op_jump::rfs(self, inst),
            Opcode::Sob => op_jump::sob(self, inst),
            Opcode::Jge => op_jump::jge(self, inst),
            Opcode::Src => op_shift::src(self, inst),
            Opcode::Rrc => op_shift::rrc(self, inst),
            Opcode::In => op_io::input(self, inst),
            Opcode::Out => op_io::output(self, inst),
            Opcode::Chk => op_io::check(self, inst),
            Opcode::Trap => trap::dispatch(self, inst),
        }
    }

    /// The base-plus-index-plus-indirection sum, before the final
    /// range check.  The pointer word of an indirect access is
    /// itself checked before it is read.
    fn raw_operand_address(&mut self, inst: Instruction, apply_index: bool) -> Result<u32, Fault> {
        let mut ea = u32::from(inst.addr());
        let ix = inst.ix();
        if apply_index && ix != 0 {
            ea += u32::from(self.regs.ixr(ix));
        }
        if inst.indirect() {
            let pointer = check_data_address(ea)?;
            ea = u32::from(self.mem.read(pointer)?) & u32::from(ADDRESS_MASK);
        }
        Ok(ea)
    }

    /// Effective address for an instruction that will access memory.
    pub(crate) fn effective_address(&mut self, inst: Instruction) -> Result<Address, Fault> {
        check_data_address(self.raw_operand_address(inst, true)?)
    }

    /// Effective address for LDX/STX, whose IX field names the
    /// register being transferred rather than an index source.
    pub(crate) fn effective_address_unindexed(
        &mut self,
        inst: Instruction,
    ) -> Result<Address, Fault> {
        check_data_address(self.raw_operand_address(inst, false)?)
    }

    /// Effective address as a value, for LDA: no memory access will
    /// follow, so the reserved/bounds rules do not apply to the
    /// result (only to any indirect dereference on the way).
    pub(crate) fn address_value(&mut self, inst: Instruction) -> Result<Address, Fault> {
        Ok(Address::new(self.raw_operand_address(inst, true)? as u16))
    }
}

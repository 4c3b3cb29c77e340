//! Load and store opcodes: LDR, STR, LDA, LDX, STX.
use base::prelude::*;

use crate::control::Transition;
use crate::fault::Fault;
use crate::machine::Machine;

pub(super) fn ldr(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let value = m.mem.read(ea)?;
    m.regs.set_gpr(inst.r(), value);
    Ok(Transition::Next)
}

pub(super) fn str(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let value = m.regs.gpr(inst.r());
    m.mem.write(ea, value)?;
    Ok(Transition::Next)
}

/// LDA loads the effective address itself, not the word at it.
pub(super) fn lda(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.address_value(inst)?;
    m.regs.set_gpr(inst.r(), ea.get());
    Ok(Transition::Next)
}

// For LDX/STX the IX field names the register being loaded or
// stored, so it takes no part in the address computation.

pub(super) fn ldx(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address_unindexed(inst)?;
    let value = m.mem.read(ea)?;
    m.regs.set_ixr(inst.ix(), value);
    Ok(Transition::Next)
}

pub(super) fn stx(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address_unindexed(inst)?;
    let value = m.regs.ixr(inst.ix());
    m.mem.write(ea, value)?;
    Ok(Transition::Next)
}

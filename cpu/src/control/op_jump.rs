//! Transfer instructions: JZ, JNE, JCC, JMA, JSR, RFS, SOB, JGE.
//!
//! Every transfer computes its effective address through the common
//! addressing unit, whether or not the condition ends up holding, so
//! a transfer naming an illegal target faults even when not taken.
//! GPR3 is the link register.
use base::prelude::*;

use crate::control::Transition;
use crate::fault::Fault;
use crate::machine::Machine;

pub(super) fn jz(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    if m.regs.gpr(inst.r()) == 0 {
        Ok(Transition::Jump(ea))
    } else {
        Ok(Transition::Next)
    }
}

pub(super) fn jne(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    if m.regs.gpr(inst.r()) != 0 {
        Ok(Transition::Jump(ea))
    } else {
        Ok(Transition::Next)
    }
}

pub(super) fn jge(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    if (m.regs.gpr(inst.r()) as i16) >= 0 {
        Ok(Transition::Jump(ea))
    } else {
        Ok(Transition::Next)
    }
}

/// JCC reads the R field as a condition-code index and branches when
/// bit `3 - cc` of the CC register is set: index 0 tests OVERFLOW,
/// index 3 tests EQUALORNOT.
pub(super) fn jcc(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let cc_index = inst.r();
    let bit = 1u8 << (3 - cc_index);
    if m.regs.cc_bit(bit) {
        Ok(Transition::Jump(ea))
    } else {
        Ok(Transition::Next)
    }
}

pub(super) fn jma(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    Ok(Transition::Jump(ea))
}

pub(super) fn jsr(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let link = m.regs.pc.successor();
    m.regs.set_gpr(3, link.get());
    Ok(Transition::Jump(ea))
}

/// RFS returns through the link register, loading GPR0 with the
/// immediate from the address field on the way out.
pub(super) fn rfs(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    m.regs.set_gpr(0, inst.addr());
    Ok(Transition::Jump(Address::new(m.regs.gpr(3))))
}

/// SOB decrements and branches while the signed result is strictly
/// positive.
pub(super) fn sob(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let r = inst.r();
    let decremented = (m.regs.gpr(r) as i16).wrapping_sub(1);
    m.regs.set_gpr(r, decremented as u16);
    if decremented > 0 {
        Ok(Transition::Jump(ea))
    } else {
        Ok(Transition::Next)
    }
}

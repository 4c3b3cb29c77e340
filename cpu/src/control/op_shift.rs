//! Shift and rotate: SRC, RRC.
//!
//! Bit 7 selects arithmetic (0) or logical (1), bit 6 selects right
//! (0) or left (1), bits 3..0 are the count.  A zero count is a
//! no-op, and rotates take their count modulo the word width.
use base::prelude::*;

use crate::control::Transition;
use crate::fault::Fault;
use crate::machine::Machine;

pub(super) fn src(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let count = inst.count();
    if count == 0 {
        return Ok(Transition::Next);
    }
    let r = inst.r();
    let value = m.regs.gpr(r);
    let shifted = if inst.left() {
        value << count
    } else if inst.logical() {
        value >> count
    } else {
        // Arithmetic right shift: the sign bit is replicated.
        ((value as i16) >> count) as u16
    };
    m.regs.set_gpr(r, shifted);
    Ok(Transition::Next)
}

pub(super) fn rrc(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let count = inst.count();
    if count == 0 {
        return Ok(Transition::Next);
    }
    let r = inst.r();
    let value = m.regs.gpr(r);
    let rotated = if inst.left() {
        value.rotate_left(count)
    } else {
        value.rotate_right(count)
    };
    m.regs.set_gpr(r, rotated);
    Ok(Transition::Next)
}

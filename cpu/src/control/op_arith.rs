//! Arithmetic and logic: AMR, SMR, AIR, SIR, ADD, SUB, MLT, DVD,
//! TRR, AND, ORR, NOT.
//!
//! All signed arithmetic widens to `i32`, so that 16-bit overflow
//! and underflow can be detected by comparing the exact result
//! against the `i16` range before truncating it back into the
//! register.
use base::prelude::*;

use crate::control::Transition;
use crate::fault::Fault;
use crate::machine::Machine;
use crate::registers::{CC_DIVZERO, CC_EQUAL, CC_OVERFLOW, CC_UNDERFLOW};

fn signed(value: Word) -> i32 {
    i32::from(value as i16)
}

/// Add `delta` to GPR\[r\], updating the overflow and underflow
/// condition bits from the exact 32-bit result.
fn add_to_register(m: &mut Machine, r: usize, delta: i32) {
    let sum = signed(m.regs.gpr(r)) + delta;
    m.regs.set_cc_bit(CC_OVERFLOW, sum > i32::from(i16::MAX));
    m.regs.set_cc_bit(CC_UNDERFLOW, sum < i32::from(i16::MIN));
    m.regs.set_gpr(r, sum as u16);
}

pub(super) fn amr(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let operand = signed(m.mem.read(ea)?);
    add_to_register(m, inst.r(), operand);
    Ok(Transition::Next)
}

pub(super) fn smr(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let ea = m.effective_address(inst)?;
    let operand = signed(m.mem.read(ea)?);
    add_to_register(m, inst.r(), -operand);
    Ok(Transition::Next)
}

/// AIR has two special cases that bypass the adder: a zero immediate
/// is a no-op, and a zero register receives the immediate directly.
pub(super) fn air(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let imm = i32::from(inst.imm8());
    let r = inst.r();
    if imm == 0 {
        return Ok(Transition::Next);
    }
    if m.regs.gpr(r) == 0 {
        m.regs.set_gpr(r, imm as u16);
    } else {
        add_to_register(m, r, imm);
    }
    Ok(Transition::Next)
}

pub(super) fn sir(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let imm = i32::from(inst.imm8());
    let r = inst.r();
    if imm == 0 {
        return Ok(Transition::Next);
    }
    if m.regs.gpr(r) == 0 {
        m.regs.set_gpr(r, (-imm) as u16);
    } else {
        add_to_register(m, r, -imm);
    }
    Ok(Transition::Next)
}

pub(super) fn add(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let operand = signed(m.regs.gpr(inst.ix()));
    add_to_register(m, inst.r(), operand);
    Ok(Transition::Next)
}

pub(super) fn sub(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let operand = signed(m.regs.gpr(inst.ix()));
    add_to_register(m, inst.r(), -operand);
    Ok(Transition::Next)
}

/// MLT leaves the 32-bit product in the register pair rx, rx+1 (high
/// half first).  OVERFLOW is set when the high half carries
/// information, that is when the product does not fit in 16 signed
/// bits.
pub(super) fn mlt(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let rx = inst.r();
    let ry = inst.ix();
    let product = signed(m.regs.gpr(rx)) * signed(m.regs.gpr(ry));
    let overflow = product > i32::from(i16::MAX) || product < i32::from(i16::MIN);
    m.regs.set_cc_bit(CC_OVERFLOW, overflow);
    m.regs.set_gpr(rx, (product >> 16) as u16);
    m.regs.set_gpr(rx + 1, product as u16);
    Ok(Transition::Next)
}

/// DVD leaves quotient and remainder in the register pair rx, rx+1.
/// A zero divisor sets DIVZERO and skips the writes entirely.
pub(super) fn dvd(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let rx = inst.r();
    let ry = inst.ix();
    let dividend = signed(m.regs.gpr(rx));
    let divisor = signed(m.regs.gpr(ry));
    if divisor == 0 {
        m.regs.set_cc_bit(CC_DIVZERO, true);
        return Ok(Transition::Next);
    }
    m.regs.set_cc_bit(CC_DIVZERO, false);
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    // The only 16-bit signed quotient that cannot be represented is
    // -32768 / -1.
    let overflow = quotient > i32::from(i16::MAX) || quotient < i32::from(i16::MIN);
    m.regs.set_cc_bit(CC_OVERFLOW, overflow);
    m.regs.set_gpr(rx, quotient as u16);
    m.regs.set_gpr(rx + 1, remainder as u16);
    Ok(Transition::Next)
}

/// TRR tests for equality.  It owns only the EQUALORNOT bit; the
/// other condition bits are left alone.
pub(super) fn trr(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let equal = m.regs.gpr(inst.r()) == m.regs.gpr(inst.ix());
    m.regs.set_cc_bit(CC_EQUAL, equal);
    Ok(Transition::Next)
}

pub(super) fn and(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let value = m.regs.gpr(inst.r()) & m.regs.gpr(inst.ix());
    m.regs.set_gpr(inst.r(), value);
    Ok(Transition::Next)
}

pub(super) fn orr(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let value = m.regs.gpr(inst.r()) | m.regs.gpr(inst.ix());
    m.regs.set_gpr(inst.r(), value);
    Ok(Transition::Next)
}

pub(super) fn not(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let value = !m.regs.gpr(inst.r());
    m.regs.set_gpr(inst.r(), value);
    Ok(Transition::Next)
}

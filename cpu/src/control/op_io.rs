//! The I/O opcodes: IN, OUT, CHK.
//!
//! IN on an empty keyboard buffer is the machine's only suspension
//! point: the program counter stays put and control returns to the
//! driver, which is expected to deposit input and resume.
use tracing::{event, Level};

use base::prelude::*;

use crate::control::Transition;
use crate::fault::Fault;
use crate::io::{DEV_KEYBOARD, DEV_PRINTER};
use crate::machine::Machine;

pub(super) fn input(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let device = inst.device();
    if device == DEV_KEYBOARD {
        match m.io.read_keyboard() {
            Some(code_point) => {
                m.regs.set_gpr(inst.r(), code_point);
                Ok(Transition::Next)
            }
            None => Ok(Transition::Await),
        }
    } else {
        event!(Level::WARN, "IN from unsupported device {device}");
        m.regs.set_gpr(inst.r(), 0);
        Ok(Transition::Next)
    }
}

pub(super) fn output(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let device = inst.device();
    if device == DEV_PRINTER {
        let byte = (m.regs.gpr(inst.r()) & 0xFF) as u8;
        m.io.print_byte(byte);
    } else {
        event!(Level::WARN, "OUT to unsupported device {device}; character discarded");
    }
    Ok(Transition::Next)
}

pub(super) fn check(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    let status = m.io.device_status(inst.device());
    m.regs.set_gpr(inst.r(), status);
    Ok(Transition::Next)
}

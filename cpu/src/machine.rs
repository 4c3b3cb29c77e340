//! The machine aggregate: register file, memory (with its cache),
//! and the I/O channels, owned together so that the execution unit,
//! the IPL loader, and the operator's deposit surface are mutually
//! exclusive by construction.
use tracing::{event, Level};

use base::prelude::*;

use crate::fault::Fault;
use crate::io::IoChannels;
use crate::memory::MemoryUnit;
use crate::registers::RegisterFile;

/// What one call to [`Machine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction completed and the machine can take another
    /// step.
    Running,
    /// HLT executed, or the step was refused because MFR is already
    /// non-zero.
    Halted,
    /// IN found the keyboard buffer empty.  PC was not advanced; the
    /// driver should deposit input and step again.
    AwaitingInput,
}

/// Why [`Machine::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Halted { cycles: u64 },
    AwaitingInput { cycles: u64 },
    /// The cycle bound was reached, or the driver requested a halt
    /// between instructions.
    Stopped { cycles: u64 },
}

#[derive(Debug)]
pub struct Machine {
    pub regs: RegisterFile,
    pub mem: MemoryUnit,
    pub io: IoChannels,
    running: bool,
    trap_source: Option<Vec<Word>>,
}

impl Machine {
    pub fn new() -> Machine {
        Machine {
            regs: RegisterFile::new(),
            mem: MemoryUnit::new(),
            io: IoChannels::new(),
            running: false,
            trap_source: None,
        }
    }

    /// Clear all memory and reset all registers, flush the cache,
    /// and drop any queued input and collected output.  The TRAP 0
    /// file configuration survives a reset; it is part of the
    /// machine's wiring, not its state.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.mem.reset();
        self.io.reset();
        self.running = false;
    }

    /// Configure the text the TRAP 0 service loads, one code point
    /// per word.
    pub fn set_trap_source(&mut self, text: &str) {
        self.trap_source = Some(text.chars().map(|ch| ch as u32 as Word).collect());
    }

    pub(crate) fn trap_source(&self) -> Option<&[Word]> {
        self.trap_source.as_deref()
    }

    /// Driver-side cancellation: clears the flag [`Machine::run`]
    /// consults between instructions.
    pub fn request_halt(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run until HLT, a fault, an input suspension, a driver halt
    /// request, or `max_cycles` instructions, whichever comes first.
    pub fn run(&mut self, max_cycles: u64) -> Result<RunOutcome, Fault> {
        self.running = true;
        let mut cycles = 0;
        while cycles < max_cycles {
            if !self.running {
                return Ok(RunOutcome::Stopped { cycles });
            }
            match self.step()? {
                StepOutcome::Running => cycles += 1,
                StepOutcome::Halted => {
                    self.running = false;
                    return Ok(RunOutcome::Halted { cycles });
                }
                StepOutcome::AwaitingInput => {
                    self.running = false;
                    return Ok(RunOutcome::AwaitingInput { cycles });
                }
            }
        }
        event!(Level::WARN, "cycle bound of {max_cycles} reached");
        self.running = false;
        Ok(RunOutcome::Stopped { cycles })
    }

    /// Operator deposit: write one word through the cache, the same
    /// path the front panel's store buttons use.
    pub fn deposit(&mut self, addr: Address, value: Word) -> Result<(), Fault> {
        self.mem.write(addr, value)
    }

    /// Operator examine: read one word without disturbing the cache.
    pub fn examine(&self, addr: Address) -> Result<Word, Fault> {
        self.mem.direct_read(addr)
    }
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::new()
    }
}

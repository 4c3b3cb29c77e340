//! Headless driver surface.
//!
//! Regression drivers and the command-line simulator talk to the
//! machine through this adapter: load an image, queue keyboard
//! input, step or run with a cycle bound, and collect everything the
//! printer produced.
use crate::fault::Fault;
use crate::ipl::{IplError, IplSummary};
use crate::machine::{Machine, RunOutcome, StepOutcome};

/// Bound on a single `run_to_halt`, so a looping program cannot hang
/// a test driver.
pub const DEFAULT_CYCLE_LIMIT: u64 = 200_000;

#[derive(Debug)]
pub struct HeadlessRunner {
    pub machine: Machine,
    cycle_limit: u64,
}

impl HeadlessRunner {
    pub fn new() -> HeadlessRunner {
        HeadlessRunner {
            machine: Machine::new(),
            cycle_limit: DEFAULT_CYCLE_LIMIT,
        }
    }

    pub fn with_cycle_limit(cycle_limit: u64) -> HeadlessRunner {
        HeadlessRunner {
            machine: Machine::new(),
            cycle_limit,
        }
    }

    pub fn ipl(&mut self, image: &str) -> Result<IplSummary, IplError> {
        self.machine.ipl(image)
    }

    /// Queue a string of code points on the keyboard.
    pub fn deposit_input(&mut self, text: &str) {
        self.machine.io.deposit_input(text);
    }

    /// Step at most `n` cycles, stopping early on halt, fault, or
    /// input suspension.
    pub fn step_n(&mut self, n: u64) -> Result<StepOutcome, Fault> {
        let mut outcome = StepOutcome::Running;
        for _ in 0..n {
            outcome = self.machine.step()?;
            if outcome != StepOutcome::Running {
                break;
            }
        }
        Ok(outcome)
    }

    pub fn run_to_halt(&mut self) -> Result<RunOutcome, Fault> {
        self.machine.run(self.cycle_limit)
    }

    /// Everything printed since reset, as text.
    pub fn printed_text(&self) -> String {
        String::from_utf8_lossy(self.machine.io.printed()).into_owned()
    }
}

impl Default for HeadlessRunner {
    fn default() -> HeadlessRunner {
        HeadlessRunner::new()
    }
}

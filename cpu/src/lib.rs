//! Simulator core for the M16 teaching machine.
//!
//! The crate is organised around a single [`Machine`] aggregate that
//! owns the register file, the 2048-word memory with its 16-line
//! FIFO cache, and the keyboard/printer channels.  The control unit
//! (fetch/decode/execute) lives in the `control` module's op files;
//! the IPL loader and the headless harness adapter are the two other
//! entry points that mutate machine state.
//!
//! Nothing here spawns threads or blocks: the only suspension point
//! is the IN instruction finding the keyboard buffer empty, which
//! returns [`StepOutcome::AwaitingInput`] to the driver.

mod cache;
mod control;
mod fault;
mod harness;
mod io;
mod ipl;
mod machine;
mod memory;
mod registers;

pub use cache::{AccessKind, Cache, CACHE_LINES};
pub use fault::Fault;
pub use harness::{HeadlessRunner, DEFAULT_CYCLE_LIMIT};
pub use io::{IoChannels, DEV_KEYBOARD, DEV_PRINTER};
pub use ipl::{IplError, IplSummary};
pub use machine::{Machine, RunOutcome, StepOutcome};
pub use memory::MemoryUnit;
pub use registers::{RegisterFile, CC_DIVZERO, CC_EQUAL, CC_OVERFLOW, CC_UNDERFLOW};

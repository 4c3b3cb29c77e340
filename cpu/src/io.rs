//! The machine's character-level I/O surface.
//!
//! Two fixed channels: device 0 is the console keyboard, device 1 the
//! console printer.  The keyboard is a single-producer /
//! single-consumer queue of code points; the driver deposits into it
//! and the IN instruction consumes from it.  The printer is a byte
//! sink the driver drains.
use std::collections::VecDeque;

use tracing::{event, Level};

use base::prelude::*;

/// Console keyboard.
pub const DEV_KEYBOARD: u16 = 0;
/// Console printer.
pub const DEV_PRINTER: u16 = 1;

#[derive(Debug, Clone, Default)]
pub struct IoChannels {
    keyboard: VecDeque<Word>,
    printer: Vec<u8>,
}

impl IoChannels {
    pub fn new() -> IoChannels {
        IoChannels::default()
    }

    pub fn reset(&mut self) {
        self.keyboard.clear();
        self.printer.clear();
    }

    /// Queue a string of code points on the keyboard, in order.
    pub fn deposit_input(&mut self, text: &str) {
        for ch in text.chars() {
            self.deposit_code_point(ch as u32 as Word);
        }
    }

    pub fn deposit_code_point(&mut self, code_point: Word) {
        self.keyboard.push_back(code_point);
    }

    pub fn keyboard_ready(&self) -> bool {
        !self.keyboard.is_empty()
    }

    pub(crate) fn read_keyboard(&mut self) -> Option<Word> {
        self.keyboard.pop_front()
    }

    pub(crate) fn peek_keyboard(&self) -> Option<Word> {
        self.keyboard.front().copied()
    }

    pub(crate) fn print_byte(&mut self, byte: u8) {
        self.printer.push(byte);
    }

    /// Everything the printer has received since reset.
    pub fn printed(&self) -> &[u8] {
        &self.printer
    }

    pub fn take_printed(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.printer)
    }

    /// Device status word for the CHK instruction: 1 when the device
    /// is ready, 0 otherwise.
    pub fn device_status(&self, device: u16) -> Word {
        match device {
            DEV_KEYBOARD => Word::from(self.keyboard_ready()),
            DEV_PRINTER => 1,
            other => {
                event!(Level::WARN, "status check of unknown device {other}");
                0
            }
        }
    }
}

//! The TRAP services.
//!
//! Four codes are wired in; the remainder of the 4-bit code space is
//! reserved and faults as an illegal trap.
//!
//! | Code | Service |
//! |------|---------|
//! | 0 | Load the configured text into memory at GPR0, length to GPR1 |
//! | 1 | Print GPR1 bytes starting at GPR0 |
//! | 2 | Read one whitespace-delimited word of input to GPR0, length to GPR1 |
//! | 3 | Paragraph word search (see [`find_word`]) |
//!
//! Text lives in memory one code point per word; the services read
//! and write through the cache and apply the same reserved/bounds
//! address rules as ordinary instructions.
use tracing::{event, Level};

use base::prelude::*;

use crate::control::{check_data_address, Transition};
use crate::fault::Fault;
use crate::machine::Machine;

pub(super) fn dispatch(m: &mut Machine, inst: Instruction) -> Result<Transition, Fault> {
    match inst.trap_code() {
        0 => load_file(m),
        1 => print_memory(m),
        2 => read_word(m),
        3 => paragraph_search(m),
        code => Err(Fault::IllegalTrap { code }),
    }
}

fn is_whitespace(code_point: Word) -> bool {
    char::from_u32(u32::from(code_point)).is_some_and(char::is_whitespace)
}

fn read_text(m: &mut Machine, start: Word, len: Word) -> Result<String, Fault> {
    let mut text = String::with_capacity(usize::from(len));
    for offset in 0..u32::from(len) {
        let addr = check_data_address(u32::from(start) + offset)?;
        let word = m.mem.read(addr)?;
        text.push(char::from_u32(u32::from(word)).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    Ok(text)
}

/// TRAP 0: deposit the out-of-band configured text into successive
/// words starting at GPR0; the length comes back in GPR1.
fn load_file(m: &mut Machine) -> Result<Transition, Fault> {
    let words = match m.trap_source() {
        Some(words) => words.to_vec(),
        None => {
            event!(Level::WARN, "TRAP 0 executed with no load file configured");
            m.regs.set_gpr(1, 0);
            return Ok(Transition::Next);
        }
    };
    let start = m.regs.gpr(0);
    for (offset, word) in words.iter().enumerate() {
        let addr = check_data_address(u32::from(start) + offset as u32)?;
        m.mem.write(addr, *word)?;
    }
    m.regs.set_gpr(1, words.len() as u16);
    Ok(Transition::Next)
}

/// TRAP 1: emit GPR1 bytes starting at address GPR0 to the printer.
fn print_memory(m: &mut Machine) -> Result<Transition, Fault> {
    let start = m.regs.gpr(0);
    let len = m.regs.gpr(1);
    for offset in 0..u32::from(len) {
        let addr = check_data_address(u32::from(start) + offset)?;
        let word = m.mem.read(addr)?;
        m.io.print_byte((word & 0xFF) as u8);
    }
    Ok(Transition::Next)
}

/// TRAP 2: skip leading whitespace, then move one word of input into
/// memory at GPR0, one code point per memory word, consuming the
/// delimiter.  The length comes back in GPR1.
fn read_word(m: &mut Machine) -> Result<Transition, Fault> {
    while m.io.peek_keyboard().is_some_and(is_whitespace) {
        m.io.read_keyboard();
    }
    let start = m.regs.gpr(0);
    let mut len: u16 = 0;
    while let Some(code_point) = m.io.peek_keyboard() {
        m.io.read_keyboard();
        if is_whitespace(code_point) {
            break;
        }
        let addr = check_data_address(u32::from(start) + u32::from(len))?;
        m.mem.write(addr, code_point)?;
        len += 1;
    }
    m.regs.set_gpr(1, len);
    Ok(Transition::Next)
}

/// TRAP 3: look a word up in a paragraph.
///
/// Inputs: paragraph at GPR0 with length GPR1, word at GPR2 with
/// length GPR3.  On a match, GPR0 receives the 1-based sentence
/// number and GPR1 the 1-based word number within that sentence; on
/// a miss GPR0 is zeroed.
fn paragraph_search(m: &mut Machine) -> Result<Transition, Fault> {
    let paragraph = {
        let (start, len) = (m.regs.gpr(0), m.regs.gpr(1));
        read_text(m, start, len)?
    };
    let needle = {
        let (start, len) = (m.regs.gpr(2), m.regs.gpr(3));
        read_text(m, start, len)?
    };
    match find_word(&paragraph, &needle) {
        Some((sentence, word)) => {
            m.regs.set_gpr(0, sentence);
            m.regs.set_gpr(1, word);
        }
        None => {
            m.regs.set_gpr(0, 0);
        }
    }
    Ok(Transition::Next)
}

/// Locate `needle` in `paragraph`, returning the 1-based sentence
/// number and 1-based word number within that sentence.
///
/// Sentences are delimited by any of `.`, `!`, `?`; words by any run
/// of non-alphanumeric characters.  Matching is case-sensitive and
/// exact (a word equal to `needle`, not merely containing it).
pub(crate) fn find_word(paragraph: &str, needle: &str) -> Option<(u16, u16)> {
    if needle.is_empty() {
        return None;
    }
    let mut sentence: u16 = 1;
    let mut word_in_sentence: u16 = 0;
    let mut current = String::new();
    // The trailing NUL flushes a word that runs to the end of the
    // paragraph.
    for ch in paragraph.chars().chain(std::iter::once('\0')) {
        if ch.is_alphanumeric() {
            current.push(ch);
            continue;
        }
        if !current.is_empty() {
            word_in_sentence += 1;
            if current == needle {
                return Some((sentence, word_in_sentence));
            }
            current.clear();
        }
        if matches!(ch, '.' | '!' | '?') {
            sentence += 1;
            word_in_sentence = 0;
        }
    }
    None
}

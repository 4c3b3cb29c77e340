//! Initial program load.
//!
//! The load image is text: one record per non-blank line, two
//! whitespace-separated octal tokens, the 12-bit address then the
//! 16-bit word.  The machine is reset first and each record is
//! deposited directly into the store, bypassing the cache (which the
//! reset has just flushed anyway).  After a successful load PC and
//! MAR point at the first record's address, ready for the operator
//! to run or step.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use base::prelude::*;

use crate::machine::Machine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IplError {
    /// A record with fewer than two tokens or a token that is not
    /// octal.  Nothing from the offending line was deposited.
    Malformed { line: usize, content: String },
    /// A record whose address falls outside the 2048-word memory.
    AddressRange { line: usize, addr: u32 },
}

impl Display for IplError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            IplError::Malformed { line, content } => {
                write!(f, "load image line {line} is malformed: {content:?}")
            }
            IplError::AddressRange { line, addr } => {
                write!(
                    f,
                    "load image line {line} names address {addr:o}, outside memory"
                )
            }
        }
    }
}

impl Error for IplError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IplSummary {
    pub words_loaded: usize,
    pub entry: Address,
}

impl Machine {
    /// Reset the machine and load a textual load image.
    pub fn ipl(&mut self, image: &str) -> Result<IplSummary, IplError> {
        self.reset();
        let mut first_address: Option<Address> = None;
        let mut words_loaded = 0;
        for (index, raw) in image.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let (addr_tok, word_tok) = match (tokens.next(), tokens.next()) {
                (Some(a), Some(w)) => (a, w),
                _ => {
                    return Err(IplError::Malformed {
                        line: line_no,
                        content: raw.to_string(),
                    });
                }
            };
            let malformed = || IplError::Malformed {
                line: line_no,
                content: raw.to_string(),
            };
            let addr = u32::from_str_radix(addr_tok, 8).map_err(|_| malformed())?;
            let word = u16::from_str_radix(word_tok, 8).map_err(|_| malformed())?;
            if addr >= MEMORY_SIZE as u32 {
                return Err(IplError::AddressRange {
                    line: line_no,
                    addr,
                });
            }
            let addr = Address::new(addr as u16);
            self.mem
                .direct_write(addr, word)
                .map_err(|_| IplError::AddressRange {
                    line: line_no,
                    addr: addr.into(),
                })?;
            if first_address.is_none() {
                first_address = Some(addr);
            }
            words_loaded += 1;
        }
        match first_address {
            Some(entry) => {
                self.regs.pc = entry;
                self.regs.mar = entry;
                event!(
                    Level::INFO,
                    "IPL successful: loaded {words_loaded} words, PC set to {entry}"
                );
                Ok(IplSummary {
                    words_loaded,
                    entry,
                })
            }
            None => {
                event!(Level::WARN, "IPL warning: load image was empty");
                Ok(IplSummary {
                    words_loaded: 0,
                    entry: Address::ZERO,
                })
            }
        }
    }
}

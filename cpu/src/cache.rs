//! The unified data/instruction cache.
//!
//! Sixteen fully-associative lines of one word each, FIFO
//! replacement, write-through with write-allocate.  The cache never
//! holds data that main memory does not: every write goes to the
//! backing store first, so invalidation is only ever needed on
//! reset.
//!
//! Telemetry (`hits`, `misses`, last access) exists for the front
//! panel and for tests; no algorithm consults it.
use std::fmt::{self, Display, Formatter};

use base::prelude::*;

use crate::memory::Store;

pub const CACHE_LINES: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
struct CacheLine {
    valid: bool,
    // With one-word lines over a 12-bit space the tag is the whole
    // address.
    tag: u16,
    data: Word,
}

/// What the most recent access did, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessKind {
    #[default]
    None,
    ReadHit,
    ReadMiss,
    WriteHit,
    WriteMiss,
}

#[derive(Debug, Clone)]
pub struct Cache {
    lines: [CacheLine; CACHE_LINES],
    victim: usize,
    hits: u64,
    misses: u64,
    last_index: Option<usize>,
    last_kind: AccessKind,
}

impl Cache {
    pub fn new() -> Cache {
        Cache {
            lines: [CacheLine::default(); CACHE_LINES],
            victim: 0,
            hits: 0,
            misses: 0,
            last_index: None,
            last_kind: AccessKind::None,
        }
    }

    /// Invalidate every line and zero the victim pointer and
    /// telemetry.  Called on every machine reset.
    pub fn reset(&mut self) {
        *self = Cache::new();
    }

    fn find(&self, addr: u16) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == addr)
    }

    /// Install a line at the victim pointer and advance it.  Returns
    /// the index used.
    fn install(&mut self, addr: u16, data: Word) -> usize {
        let index = self.victim;
        self.lines[index] = CacheLine {
            valid: true,
            tag: addr,
            data,
        };
        self.victim = (self.victim + 1) % CACHE_LINES;
        index
    }

    pub fn read(&mut self, addr: u16, store: &Store) -> Word {
        match self.find(addr) {
            Some(index) => {
                self.hits += 1;
                self.last_index = Some(index);
                self.last_kind = AccessKind::ReadHit;
                self.lines[index].data
            }
            None => {
                self.misses += 1;
                let data = store.get(addr);
                let index = self.install(addr, data);
                self.last_index = Some(index);
                self.last_kind = AccessKind::ReadMiss;
                data
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: Word, store: &mut Store) {
        // Write-through: main memory is updated unconditionally.
        store.set(addr, value);
        match self.find(addr) {
            Some(index) => {
                // A write hit updates in place; the victim pointer
                // does not move.
                self.hits += 1;
                self.lines[index].data = value;
                self.last_index = Some(index);
                self.last_kind = AccessKind::WriteHit;
            }
            None => {
                // Write-allocate: a write miss installs the line.
                self.misses += 1;
                let index = self.install(addr, value);
                self.last_index = Some(index);
                self.last_kind = AccessKind::WriteMiss;
            }
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn victim_pointer(&self) -> usize {
        self.victim
    }

    pub fn last_access(&self) -> (Option<usize>, AccessKind) {
        (self.last_index, self.last_kind)
    }

    /// The tag and data of line `index`, or None while the line is
    /// invalid.
    pub fn line(&self, index: usize) -> Option<(u16, Word)> {
        let line = &self.lines[index];
        line.valid.then_some((line.tag, line.data))
    }
}

impl Default for Cache {
    fn default() -> Cache {
        Cache::new()
    }
}

impl Display for Cache {
    /// Front-panel rendering of the cache contents.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        writeln!(f, "FIFO Ptr -> {:02}", self.victim)?;
        writeln!(f, "LN | V | Tag(Oct) | Data(Oct)")?;
        writeln!(f, "---|---|----------|----------")?;
        for (index, line) in self.lines.iter().enumerate() {
            if line.valid {
                writeln!(
                    f,
                    "{:02} | 1 | {:04o} | {:06o}",
                    index, line.tag, line.data
                )?;
            } else {
                writeln!(f, "{index:02} | 0 | ---- | ------")?;
            }
        }
        Ok(())
    }
}

//! Main memory: exactly 2048 sixteen-bit words, zero-initialized at
//! power-up and on reset, fronted by the cache.
//!
//! The cache needs a path to the backing store that does not recurse
//! through itself, and the IPL loader needs to deposit words without
//! disturbing cache state.  Both use the `direct_read`/`direct_write`
//! pair, which bypasses the cache but still enforces bounds.
//!
//! The cache and the store are owned jointly by [`MemoryUnit`]; the
//! cache receives the store as an explicit argument on each access,
//! so there is no back-reference and no second ownership path.
use base::prelude::*;

use crate::cache::Cache;
use crate::fault::Fault;

/// The raw word array.  Callers must have bounds-checked already;
/// this type only asserts.
#[derive(Debug, Clone)]
pub struct Store {
    words: Vec<Word>,
}

impl Store {
    fn new() -> Store {
        Store {
            words: vec![0; MEMORY_SIZE],
        }
    }

    fn zero(&mut self) {
        self.words.fill(0);
    }

    pub(crate) fn get(&self, addr: u16) -> Word {
        debug_assert!((addr as usize) < MEMORY_SIZE);
        self.words[addr as usize]
    }

    pub(crate) fn set(&mut self, addr: u16, value: Word) {
        debug_assert!((addr as usize) < MEMORY_SIZE);
        self.words[addr as usize] = value;
    }
}

#[derive(Debug, Clone)]
pub struct MemoryUnit {
    store: Store,
    cache: Cache,
}

impl MemoryUnit {
    pub fn new() -> MemoryUnit {
        MemoryUnit {
            store: Store::new(),
            cache: Cache::new(),
        }
    }

    /// Zero every word and flush the cache.
    pub fn reset(&mut self) {
        self.store.zero();
        self.cache.reset();
    }

    fn check_bounds(addr: Address) -> Result<u16, Fault> {
        let a = addr.get();
        if (a as usize) < MEMORY_SIZE {
            Ok(a)
        } else {
            Err(Fault::BeyondMemory { addr: a.into() })
        }
    }

    /// Cached read.
    pub fn read(&mut self, addr: Address) -> Result<Word, Fault> {
        let a = Self::check_bounds(addr)?;
        Ok(self.cache.read(a, &self.store))
    }

    /// Cached write (write-through, write-allocate).
    pub fn write(&mut self, addr: Address, value: Word) -> Result<(), Fault> {
        let a = Self::check_bounds(addr)?;
        self.cache.write(a, value, &mut self.store);
        Ok(())
    }

    /// Uncached read, for the operator's examine surface and tests.
    pub fn direct_read(&self, addr: Address) -> Result<Word, Fault> {
        let a = Self::check_bounds(addr)?;
        Ok(self.store.get(a))
    }

    /// Uncached write, used by the IPL loader.
    pub fn direct_write(&mut self, addr: Address, value: Word) -> Result<(), Fault> {
        let a = Self::check_bounds(addr)?;
        self.store.set(a, value);
        Ok(())
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}

impl Default for MemoryUnit {
    fn default() -> MemoryUnit {
        MemoryUnit::new()
    }
}

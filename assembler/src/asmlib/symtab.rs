//! The symbol table: label name to absolute address.
//!
//! Pass 1 fills it, pass 2 only reads.  Duplicate definitions are a
//! fatal assembly error; lookups never mutate.
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::AssemblyErrorKind;

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    entries: HashMap<String, u16>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.entries.get(name).copied()
    }

    /// Define a label.  The caller attaches the line number to the
    /// error; the table only knows the name clashed.
    pub fn put(&mut self, name: &str, address: u16) -> Result<(), AssemblyErrorKind> {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AssemblyErrorKind::DuplicateLabel(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(address);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries for the driver's debug dump; no defined
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.entries.iter().map(|(name, addr)| (name.as_str(), *addr))
    }
}

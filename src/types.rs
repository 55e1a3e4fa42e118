//! Type-safe wrappers for interned automaton states and symbols.
//!
//! Automata arrive with string names for states and symbols. The simulator
//! interns them into dense integer ids so that configurations hash and
//! compare cheaply, and maps them back to names only when a trace is built.

use std::collections::HashMap;
use std::fmt;

/// An interned state identifier (0-indexed, dense).
///
/// # Invariants
///
/// - Ids are only meaningful relative to the [`Interner`] that produced them
/// - Ids are assigned in first-seen order, starting at 0
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StateId(u32);

impl StateId {
    /// Creates a state id from a raw index.
    pub fn new(id: u32) -> Self {
        StateId(id)
    }

    /// Returns the raw index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        StateId(id)
    }
}

/// An interned symbol identifier, used for both input and stack symbols.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Creates a symbol id from a raw index.
    pub fn new(id: u32) -> Self {
        SymbolId(id)
    }

    /// Returns the raw index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for SymbolId {
    fn from(id: u32) -> Self {
        SymbolId(id)
    }
}

/// Bidirectional mapping between names and dense ids.
#[derive(Debug, Clone)]
pub struct Interner<Id> {
    names: Vec<String>,
    ids: HashMap<String, Id>,
}

impl<Id> Default for Interner<Id> {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            ids: HashMap::new(),
        }
    }
}

impl<Id: Copy + From<u32>> Interner<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, allocating a fresh one on first sight.
    pub fn intern(&mut self, name: &str) -> Id {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = Id::from(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Looks up an already interned name.
    pub fn get(&self, name: &str) -> Option<Id> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Interner<StateId> {
    pub fn name(&self, id: StateId) -> &str {
        &self.names[id.index()]
    }
}

impl Interner<SymbolId> {
    pub fn name(&self, id: SymbolId) -> &str {
        &self.names[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_first_seen_order() {
        let mut states = Interner::<StateId>::new();
        let q0 = states.intern("q0");
        let q1 = states.intern("q1");
        assert_eq!(q0.index(), 0);
        assert_eq!(q1.index(), 1);
        assert_eq!(states.intern("q0"), q0);
        assert_eq!(states.len(), 2);
    }

    #[test]
    fn test_intern_round_trip_names() {
        let mut symbols = Interner::<SymbolId>::new();
        let z = symbols.intern("Z");
        let a = symbols.intern("A");
        assert_eq!(symbols.name(z), "Z");
        assert_eq!(symbols.name(a), "A");
        assert_eq!(symbols.get("B"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StateId::new(3).to_string(), "s3");
        assert_eq!(SymbolId::new(7).to_string(), "#7");
        assert!(StateId::new(1) < StateId::new(2));
    }
}

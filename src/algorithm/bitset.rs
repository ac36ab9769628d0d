use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which symbols remain possible in a cell
///
/// Uses 0-based symbol ids. Provides O(1) membership testing and removal
/// without allocating in the propagation loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolBitset {
    bits: BitVec,
    symbol_count: usize,
}

impl SymbolBitset {
    /// Create a bitset with no symbols present
    pub fn new(symbol_count: usize) -> Self {
        Self {
            bits: bitvec![0; symbol_count],
            symbol_count,
        }
    }

    /// Create a bitset containing every symbol
    pub fn all(symbol_count: usize) -> Self {
        Self {
            bits: bitvec![1; symbol_count],
            symbol_count,
        }
    }

    /// Mark every symbol present again
    pub fn fill(&mut self) {
        self.bits.fill(true);
    }

    /// Insert a symbol; out-of-range ids are ignored
    pub fn insert(&mut self, symbol: usize) {
        if symbol < self.symbol_count {
            self.bits.set(symbol, true);
        }
    }

    /// Remove a symbol, returning whether it was present
    pub fn remove(&mut self, symbol: usize) -> bool {
        if !self.contains(symbol) {
            return false;
        }
        self.bits.set(symbol, false);
        true
    }

    /// Test symbol membership
    pub fn contains(&self, symbol: usize) -> bool {
        self.bits.get(symbol).as_deref() == Some(&true)
    }

    /// Test if no symbols are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count symbols in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest symbol present
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Iterate over present symbols in increasing order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all symbol ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Capacity of the set
    pub const fn symbol_count(&self) -> usize {
        self.symbol_count
    }
}

impl fmt::Display for SymbolBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SymbolBitset({} symbols: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}

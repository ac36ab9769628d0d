//! Per-cell possibility state with incrementally maintained aggregates
//!
//! Each cell keeps its possible symbols, one support counter per symbol and
//! direction, and the sums needed for entropy. Aggregates only ever change
//! through [`Wave::eliminate`]; they are recomputed from scratch solely by
//! [`Wave::reset`].

use crate::algorithm::bitset::SymbolBitset;
use crate::analysis::rules::PropagatorTable;
use crate::analysis::statistics::SymbolStatistics;
use crate::math::probability::{entropy_of, shannon_entropy};
use crate::spatial::grid::Direction;

// Tolerance for comparing incremental floating point sums against fresh ones
const AGGREGATE_TOLERANCE: f64 = 1e-9;

/// State of one output cell
#[derive(Debug, Clone)]
pub struct WaveCell {
    /// Symbols still possible here
    pub possible: SymbolBitset,
    /// Per symbol and direction: neighbour symbols still supporting it
    pub compatible: Vec<[u32; 4]>,
    /// Number of possible symbols
    pub remaining: usize,
    /// Sum of weights of possible symbols
    pub sum_of_weights: f64,
    /// Sum of `w · ln(w)` of possible symbols
    pub sum_of_weight_log_weights: f64,
    /// Entropy of the possible symbols' weight distribution
    pub entropy: f64,
}

impl WaveCell {
    fn new(symbol_count: usize) -> Self {
        Self {
            possible: SymbolBitset::all(symbol_count),
            compatible: vec![[0; 4]; symbol_count],
            remaining: symbol_count,
            sum_of_weights: 0.0,
            sum_of_weight_log_weights: 0.0,
            entropy: 0.0,
        }
    }
}

/// The wave: one [`WaveCell`] per output cell
#[derive(Debug, Clone)]
pub struct Wave {
    cells: Vec<WaveCell>,
    symbol_count: usize,
}

impl Wave {
    /// Allocate a wave and reset it to the all-possible state
    pub fn new(
        cell_count: usize,
        table: &PropagatorTable,
        statistics: &SymbolStatistics,
    ) -> Self {
        let symbol_count = statistics.symbol_count();
        let mut wave = Self {
            cells: (0..cell_count).map(|_| WaveCell::new(symbol_count)).collect(),
            symbol_count,
        };
        wave.reset(table, statistics);
        wave
    }

    /// Make every symbol possible everywhere again
    ///
    /// Support counters start at the number of symbols that may sit on the
    /// supplying side: `compatible[t][d] = |table[opposite(d)][t]|`.
    pub fn reset(&mut self, table: &PropagatorTable, statistics: &SymbolStatistics) {
        let mut initial_counts = vec![[0u32; 4]; self.symbol_count];
        for (symbol, counts) in initial_counts.iter_mut().enumerate() {
            for direction in Direction::ALL {
                if let Some(count) = counts.get_mut(direction.index()) {
                    *count = table.support_count(direction.opposite(), symbol) as u32;
                }
            }
        }

        for cell in &mut self.cells {
            cell.possible.fill();
            cell.compatible.copy_from_slice(&initial_counts);
            cell.remaining = self.symbol_count;
            cell.sum_of_weights = statistics.sum_of_weights();
            cell.sum_of_weight_log_weights = statistics.sum_of_weight_log_weights();
            cell.entropy = statistics.starting_entropy();
        }
    }

    /// Remove a symbol from a cell and update its aggregates
    ///
    /// Returns the cell's remaining count, or `None` if the symbol was
    /// already impossible (or out of range) and nothing changed.
    pub(crate) fn eliminate(
        &mut self,
        cell: usize,
        symbol: usize,
        statistics: &SymbolStatistics,
    ) -> Option<usize> {
        let state = self.cells.get_mut(cell)?;
        if !state.possible.remove(symbol) {
            return None;
        }

        if let Some(counts) = state.compatible.get_mut(symbol) {
            *counts = [0; 4];
        }

        state.remaining -= 1;
        state.sum_of_weights -= statistics.weight(symbol);
        state.sum_of_weight_log_weights -= statistics.weight_log_weight(symbol);
        state.entropy = shannon_entropy(state.sum_of_weights, state.sum_of_weight_log_weights);

        Some(state.remaining)
    }

    /// Decrement one support counter, returning true when it just reached zero
    ///
    /// Counters of impossible symbols stay at zero.
    pub(crate) fn decrement_support(
        &mut self,
        cell: usize,
        symbol: usize,
        direction: Direction,
    ) -> bool {
        let Some(count) = self
            .cells
            .get_mut(cell)
            .and_then(|state| state.compatible.get_mut(symbol))
            .and_then(|counts| counts.get_mut(direction.index()))
        else {
            return false;
        };

        if *count == 0 {
            return false;
        }
        *count -= 1;
        *count == 0
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of symbols
    pub const fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// State of a cell
    pub fn cell(&self, cell: usize) -> Option<&WaveCell> {
        self.cells.get(cell)
    }

    /// Number of symbols still possible in a cell
    pub fn remaining(&self, cell: usize) -> usize {
        self.cells.get(cell).map_or(0, |state| state.remaining)
    }

    /// Cached entropy of a cell
    pub fn entropy(&self, cell: usize) -> f64 {
        self.cells.get(cell).map_or(0.0, |state| state.entropy)
    }

    /// Whether a symbol is still possible in a cell
    pub fn is_possible(&self, cell: usize, symbol: usize) -> bool {
        self.cells
            .get(cell)
            .is_some_and(|state| state.possible.contains(symbol))
    }

    /// Possible symbols of a cell in increasing order
    pub fn possible_symbols(&self, cell: usize) -> Vec<usize> {
        self.cells
            .get(cell)
            .map(|state| state.possible.to_vec())
            .unwrap_or_default()
    }

    /// Lowest possible symbol of a cell
    pub fn first_possible(&self, cell: usize) -> Option<usize> {
        self.cells.get(cell).and_then(|state| state.possible.first())
    }

    /// Support counter of a symbol in a cell
    pub fn support(&self, cell: usize, symbol: usize, direction: Direction) -> u32 {
        self.cells
            .get(cell)
            .and_then(|state| state.compatible.get(symbol))
            .and_then(|counts| counts.get(direction.index()))
            .copied()
            .unwrap_or(0)
    }

    /// Whether any cell has no possible symbol left
    pub fn is_contradiction(&self) -> bool {
        self.cells.iter().any(|state| state.remaining == 0)
    }

    /// Whether every cell has exactly one possible symbol
    pub fn is_collapsed(&self) -> bool {
        self.cells.iter().all(|state| state.remaining == 1)
    }

    /// Check a cell's cached aggregates against a recomputation from its bitset
    pub fn is_consistent(&self, cell: usize, statistics: &SymbolStatistics) -> bool {
        let Some(state) = self.cells.get(cell) else {
            return false;
        };

        let possible = state.possible.to_vec();
        let sum: f64 = possible.iter().map(|&t| statistics.weight(t)).sum();
        let sum_log: f64 = possible
            .iter()
            .map(|&t| statistics.weight_log_weight(t))
            .sum();
        let entropy = entropy_of(possible.iter().map(|&t| statistics.weight(t)));

        let close = |a: f64, b: f64| (a - b).abs() <= AGGREGATE_TOLERANCE * a.abs().max(1.0);

        state.remaining == possible.len()
            && close(state.sum_of_weights, sum)
            && close(state.sum_of_weight_log_weights, sum_log)
            && (possible.is_empty() || close(state.entropy, entropy))
    }
}

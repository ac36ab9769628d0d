use crate::algorithm::wave::Wave;
use crate::analysis::rules::PropagatorTable;
use crate::analysis::statistics::SymbolStatistics;
use crate::spatial::grid::{Direction, Topology};
use std::fmt;

/// Some cell lost every possible symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// First cell found empty
    pub cell: usize,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell {} has no possible symbol left", self.cell)
    }
}

/// Worklist-driven arc consistency over the wave
///
/// Every ban pushes `(cell, symbol)` onto a LIFO stack; draining the stack
/// withdraws the banned symbol's support from each neighbour. A pair is
/// banned at most once per run, so the stack never outgrows
/// `cells × symbols` and draining always terminates.
#[derive(Debug, Clone)]
pub struct Propagator {
    worklist: Vec<(usize, usize)>,
    contradiction: Option<usize>,
}

impl Propagator {
    /// Create a propagator with room for every possible ban
    pub fn new(cell_count: usize, symbol_count: usize) -> Self {
        Self {
            worklist: Vec::with_capacity(cell_count * symbol_count),
            contradiction: None,
        }
    }

    /// Drop pending work and any recorded contradiction
    pub fn clear(&mut self) {
        self.worklist.clear();
        self.contradiction = None;
    }

    /// Number of bans waiting to be propagated
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    /// Cell recorded as empty since the last clear
    pub const fn contradiction(&self) -> Option<usize> {
        self.contradiction
    }

    /// Eliminate a symbol from a cell and queue its consequences
    ///
    /// Returns false when the symbol was already impossible there.
    pub fn ban(
        &mut self,
        wave: &mut Wave,
        statistics: &SymbolStatistics,
        cell: usize,
        symbol: usize,
    ) -> bool {
        let Some(remaining) = wave.eliminate(cell, symbol, statistics) else {
            return false;
        };

        self.worklist.push((cell, symbol));
        if remaining == 0 && self.contradiction.is_none() {
            self.contradiction = Some(cell);
        }
        true
    }

    /// Drain the worklist until a fixpoint or the first empty cell
    ///
    /// # Errors
    ///
    /// Returns the empty cell as soon as one appears; pending work is dropped.
    pub fn propagate(
        &mut self,
        wave: &mut Wave,
        table: &PropagatorTable,
        topology: &Topology,
        statistics: &SymbolStatistics,
    ) -> Result<(), Contradiction> {
        self.check()?;

        while let Some((cell, symbol)) = self.worklist.pop() {
            for direction in Direction::ALL {
                let Some(neighbor) = topology.neighbor(cell, direction) else {
                    continue;
                };

                for &supported in table.compatible(direction, symbol) {
                    if wave.decrement_support(neighbor, supported, direction) {
                        self.ban(wave, statistics, neighbor, supported);
                        self.check()?;
                    }
                }
            }
        }

        Ok(())
    }

    fn check(&mut self) -> Result<(), Contradiction> {
        match self.contradiction {
            Some(cell) => {
                self.worklist.clear();
                Err(Contradiction { cell })
            }
            None => Ok(()),
        }
    }
}

use crate::algorithm::executor::RandomSelector;
use crate::algorithm::wave::Wave;
use crate::io::configuration::ENTROPY_NOISE;
use crate::spatial::grid::Topology;
use clap::ValueEnum;
use std::fmt;

/// Policy for choosing the next cell to collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Heuristic {
    /// Lowest cached entropy first, ties broken by jitter
    #[default]
    Entropy,
    /// Fewest remaining symbols first, ties broken by jitter
    #[value(name = "mrv")]
    MinimumRemainingValues,
    /// First undecided cell in row-major order
    Scanline,
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Entropy => "entropy",
            Self::MinimumRemainingValues => "mrv",
            Self::Scanline => "scanline",
        };
        f.write_str(name)
    }
}

/// Chooses cells according to a fixed [`Heuristic`]
///
/// Only anchor cells with more than one remaining symbol are eligible.
#[derive(Debug, Clone)]
pub struct CellSelector {
    heuristic: Heuristic,
    cursor: usize,
}

impl CellSelector {
    /// Create a selector for one heuristic
    pub const fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            cursor: 0,
        }
    }

    /// Heuristic this selector applies
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Rewind the scanline cursor for a new run
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Next cell to collapse, or `None` once no choice remains
    pub fn next_cell(
        &mut self,
        wave: &Wave,
        topology: &Topology,
        random: &mut RandomSelector,
    ) -> Option<usize> {
        match self.heuristic {
            Heuristic::Scanline => self.next_in_scanline(wave, topology),
            Heuristic::Entropy => Self::next_by_minimum(wave, topology, random, |cell| {
                wave.entropy(cell)
            }),
            Heuristic::MinimumRemainingValues => {
                Self::next_by_minimum(wave, topology, random, |cell| wave.remaining(cell) as f64)
            }
        }
    }

    fn next_in_scanline(&mut self, wave: &Wave, topology: &Topology) -> Option<usize> {
        let found = (self.cursor..wave.cell_count())
            .find(|&cell| topology.is_anchor(cell) && wave.remaining(cell) > 1);

        match found {
            Some(cell) => {
                self.cursor = cell + 1;
                Some(cell)
            }
            None => {
                self.cursor = wave.cell_count();
                None
            }
        }
    }

    // Noise is drawn only for cells that can still beat the current minimum
    fn next_by_minimum(
        wave: &Wave,
        topology: &Topology,
        random: &mut RandomSelector,
        value: impl Fn(usize) -> f64,
    ) -> Option<usize> {
        let mut minimum = f64::MAX;
        let mut chosen = None;

        for cell in 0..wave.cell_count() {
            if !topology.is_anchor(cell) || wave.remaining(cell) <= 1 {
                continue;
            }

            let score = value(cell);
            if score <= minimum {
                let jittered = ENTROPY_NOISE.mul_add(random.next_unit(), score);
                if jittered < minimum {
                    minimum = jittered;
                    chosen = Some(cell);
                }
            }
        }

        chosen
    }
}

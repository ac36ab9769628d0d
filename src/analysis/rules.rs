//! Adjacency compatibility between symbols
//!
//! A [`CompatibilityRelation`] is the set of observed or declared adjacencies;
//! a [`PropagatorTable`] is its flattened per-direction form consumed by the
//! propagation engine.

use crate::spatial::grid::Direction;
use crate::spatial::tiles::{Pattern, Transform, patterns_agree};
use ndarray::Array2;
use std::collections::BTreeSet;

/// Set of `(a, b, direction)` triples: `b` may sit next to `a` in `direction`
///
/// Every insertion also records the mirrored triple
/// `(b, a, direction.opposite())`, so the relation is always symmetric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityRelation {
    triples: BTreeSet<(usize, usize, Direction)>,
}

impl CompatibilityRelation {
    /// Create an empty relation
    pub const fn new() -> Self {
        Self {
            triples: BTreeSet::new(),
        }
    }

    /// Allow `b` next to `a` in `direction` (and `a` next to `b` opposite)
    pub fn allow(&mut self, a: usize, b: usize, direction: Direction) {
        self.triples.insert((a, b, direction));
        self.triples.insert((b, a, direction.opposite()));
    }

    /// Record every adjacency observed in a labeled sample
    ///
    /// Neighbours past the sample edge are only observed when `periodic_input`
    /// is set. With `symmetry > 1` each observation is also recorded under the
    /// first `symmetry` square symmetries, matching pattern augmentation.
    pub fn from_observations(labels: &Array2<u8>, periodic_input: bool, symmetry: usize) -> Self {
        let mut relation = Self::new();
        let (rows, cols) = labels.dim();

        for ((row, col), &current) in labels.indexed_iter() {
            for direction in Direction::ALL {
                let (dx, dy) = direction.offset();
                let x2 = col as i64 + i64::from(dx);
                let y2 = row as i64 + i64::from(dy);

                let inside = x2 >= 0 && y2 >= 0 && x2 < cols as i64 && y2 < rows as i64;
                if !inside && !periodic_input {
                    continue;
                }

                let x2 = x2.rem_euclid(cols as i64) as usize;
                let y2 = y2.rem_euclid(rows as i64) as usize;
                let Some(&neighbor) = labels.get((y2, x2)) else {
                    continue;
                };

                for transform in Transform::ALL.iter().take(symmetry.max(1)) {
                    relation.allow(
                        usize::from(current),
                        usize::from(neighbor),
                        transform.apply_to_direction(direction),
                    );
                }
            }
        }

        relation
    }

    /// Whether `b` may sit next to `a` in `direction`
    pub fn contains(&self, a: usize, b: usize, direction: Direction) -> bool {
        self.triples.contains(&(a, b, direction))
    }

    /// Iterate over all triples in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize, Direction)> {
        self.triples.iter()
    }

    /// Number of triples, mirrored ones included
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether no adjacency is allowed at all
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Largest symbol index mentioned plus one
    pub fn symbol_bound(&self) -> usize {
        self.triples
            .iter()
            .map(|&(a, b, _)| a.max(b) + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Compatible neighbour lists for every `(direction, symbol)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagatorTable {
    lists: [Vec<Vec<usize>>; 4],
    symbol_count: usize,
}

impl PropagatorTable {
    /// Flatten a compatibility relation over `symbol_count` symbols
    ///
    /// Triples mentioning symbols outside `0..symbol_count` are ignored.
    pub fn from_relation(relation: &CompatibilityRelation, symbol_count: usize) -> Self {
        let mut lists: [Vec<Vec<usize>>; 4] =
            std::array::from_fn(|_| vec![Vec::new(); symbol_count]);

        for &(a, b, direction) in relation.iter() {
            if b >= symbol_count {
                continue;
            }
            if let Some(list) = lists
                .get_mut(direction.index())
                .and_then(|per_symbol| per_symbol.get_mut(a))
            {
                list.push(b);
            }
        }

        Self {
            lists,
            symbol_count,
        }
    }

    /// Build the table from pixel overlap agreement between patterns
    ///
    /// Costs `patterns² × 4 × size²`; the result depends on the patterns only.
    pub fn from_overlap(patterns: &[Pattern]) -> Self {
        let symbol_count = patterns.len();
        let lists: [Vec<Vec<usize>>; 4] = std::array::from_fn(|d| {
            let Some(direction) = Direction::from_index(d) else {
                return vec![Vec::new(); symbol_count];
            };
            patterns
                .iter()
                .map(|first| {
                    patterns
                        .iter()
                        .enumerate()
                        .filter(|(_, second)| patterns_agree(first, second, direction))
                        .map(|(index, _)| index)
                        .collect()
                })
                .collect()
        });

        Self {
            lists,
            symbol_count,
        }
    }

    /// Symbols allowed next to `symbol` in `direction`
    pub fn compatible(&self, direction: Direction, symbol: usize) -> &[usize] {
        self.lists
            .get(direction.index())
            .and_then(|per_symbol| per_symbol.get(symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of symbols allowed next to `symbol` in `direction`
    pub fn support_count(&self, direction: Direction, symbol: usize) -> usize {
        self.compatible(direction, symbol).len()
    }

    /// Number of symbols the table covers
    pub const fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Recover the relation this table encodes
    pub fn to_relation(&self) -> CompatibilityRelation {
        let mut relation = CompatibilityRelation::new();
        for direction in Direction::ALL {
            for a in 0..self.symbol_count {
                for &b in self.compatible(direction, a) {
                    relation.allow(a, b, direction);
                }
            }
        }
        relation
    }

    /// Whether `b ∈ table[d][a]` always implies `a ∈ table[opposite(d)][b]`
    pub fn is_symmetric(&self) -> bool {
        Direction::ALL.iter().all(|&direction| {
            (0..self.symbol_count).all(|a| {
                self.compatible(direction, a)
                    .iter()
                    .all(|&b| self.compatible(direction.opposite(), b).contains(&a))
            })
        })
    }
}

use crate::{
    algorithm::propagation::{Contradiction, Propagator},
    algorithm::reconstruction,
    algorithm::selection::{CellSelector, Heuristic},
    algorithm::wave::Wave,
    analysis::patterns::SampleProcessor,
    analysis::rules::{CompatibilityRelation, PropagatorTable},
    analysis::statistics::SymbolStatistics,
    io::configuration::{
        DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE, DEFAULT_SYMMETRY,
        MAX_GRID_DIMENSION, MAX_PALETTE_SIZE, VALID_SYMMETRIES,
    },
    io::error::{AlgorithmError, Result, invalid_parameter},
    math::probability::weighted_index,
    spatial::grid::{Color, Topology},
    spatial::tiles::{Pattern, PatternExtractor, Transform},
};
use clap::ValueEnum;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt;

/// How symbols and their adjacency rules are derived from a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelKind {
    /// Overlapping `P × P` patterns, compatible when their overlap agrees
    #[default]
    Overlapping,
    /// Single colors, compatible when observed side by side
    Adjacency,
}

impl ModelKind {
    /// Pattern size used when the caller does not choose one
    pub const fn default_pattern_size(self) -> usize {
        match self {
            Self::Overlapping => DEFAULT_PATTERN_SIZE,
            Self::Adjacency => 1,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlapping => f.write_str("overlapping"),
            Self::Adjacency => f.write_str("adjacency"),
        }
    }
}

/// Parameters of one generation, fixed before a solve starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmConfig {
    /// Symbol model
    pub model: ModelKind,
    /// Edge length of extracted patterns
    pub pattern_size: usize,
    /// Number of square symmetries applied to each observation (1, 2, 4 or 8)
    pub symmetry: usize,
    /// Whether the sample wraps around its edges
    pub periodic_input: bool,
    /// Whether the output wraps around its edges
    pub periodic_output: bool,
    /// Pin the last symbol to the bottom row and forbid it elsewhere
    pub ground: bool,
    /// Cell selection policy
    pub heuristic: Heuristic,
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Overlapping,
            pattern_size: DEFAULT_PATTERN_SIZE,
            symmetry: DEFAULT_SYMMETRY,
            periodic_input: false,
            periodic_output: false,
            ground: false,
            heuristic: Heuristic::Entropy,
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
        }
    }
}

impl AlgorithmConfig {
    /// Check the configuration against a sample of `(rows, cols)`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern size is zero, or not 1 for the adjacency model
    /// - The symmetry is not one of 1, 2, 4 or 8
    /// - The pattern does not fit the sample under non-periodic input
    /// - The output is rejected by [`Self::validate_output`]
    pub fn validate(&self, sample_dims: (usize, usize)) -> Result<()> {
        if self.pattern_size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &"must be at least 1",
            ));
        }
        if self.model == ModelKind::Adjacency && self.pattern_size != 1 {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &"the adjacency model works on single cells",
            ));
        }
        if !VALID_SYMMETRIES.contains(&self.symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &self.symmetry,
                &"must be 1, 2, 4 or 8",
            ));
        }

        let (rows, cols) = sample_dims;
        if !self.periodic_input && (self.pattern_size > rows || self.pattern_size > cols) {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &format!("larger than the {cols}x{rows} sample without periodic input"),
            ));
        }

        self.validate_output(self.pattern_size)
    }

    /// Check the output dimensions for patterns of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero, exceeds
    /// `MAX_GRID_DIMENSION`, or is smaller than the pattern under
    /// non-periodic output.
    pub fn validate_output(&self, pattern_size: usize) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
            if !self.periodic_output && value < pattern_size {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("smaller than pattern size {pattern_size} without periodic output"),
                ));
            }
        }
        Ok(())
    }
}

/// Symbols, their colors, weights and adjacency rules
#[derive(Debug, Clone)]
pub struct Model {
    kind: ModelKind,
    pattern_size: usize,
    palette: Vec<Color>,
    patterns: Vec<Pattern>,
    table: PropagatorTable,
    statistics: SymbolStatistics,
}

impl Model {
    /// Learn a model from a sample grid of `(rows, cols)`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not fit the sample or the
    /// sample itself is unusable.
    pub fn from_sample(sample: &Array2<Color>, config: &AlgorithmConfig) -> Result<Self> {
        let processor = SampleProcessor::from_grid(sample)?;
        Self::from_processor(processor, config)
    }

    /// Learn a model from an already labeled sample
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not fit the sample.
    pub fn from_processor(processor: SampleProcessor, config: &AlgorithmConfig) -> Result<Self> {
        let (labels, palette) = processor.into_parts();
        config.validate(labels.dim())?;

        let extractor = PatternExtractor::extract(
            &labels,
            config.pattern_size,
            config.symmetry,
            config.periodic_input,
        );
        let patterns = extractor.into_patterns();

        let table = match config.model {
            ModelKind::Overlapping => PropagatorTable::from_overlap(&patterns),
            ModelKind::Adjacency => {
                let observed = CompatibilityRelation::from_observations(
                    &labels,
                    config.periodic_input,
                    config.symmetry,
                );
                let relation = relabel(&observed, &patterns, palette.len());
                PropagatorTable::from_relation(&relation, patterns.len())
            }
        };

        let statistics = SymbolStatistics::new(patterns.iter().map(|p| p.weight).collect())?;

        Ok(Self {
            kind: config.model,
            pattern_size: config.pattern_size,
            palette,
            patterns,
            table,
            statistics,
        })
    }

    /// Build an adjacency model from handcrafted rules
    ///
    /// Symbol `i` is drawn with color `palette[i]` and weight `weights[i]`.
    ///
    /// # Errors
    ///
    /// Returns an error if palette and weights differ in length, the
    /// relation names a symbol outside the palette, or a weight is not
    /// positive.
    pub fn from_rules(
        palette: Vec<Color>,
        weights: Vec<f64>,
        relation: &CompatibilityRelation,
    ) -> Result<Self> {
        if palette.len() != weights.len() {
            return Err(invalid_parameter(
                "weights",
                &weights.len(),
                &format!("expected one weight per color ({})", palette.len()),
            ));
        }
        if palette.len() > MAX_PALETTE_SIZE {
            return Err(invalid_parameter(
                "palette",
                &palette.len(),
                &format!("at most {MAX_PALETTE_SIZE} symbols are supported"),
            ));
        }
        let bound = relation.symbol_bound();
        if bound > palette.len() {
            return Err(AlgorithmError::InvalidSymbolIndex {
                index: bound - 1,
                symbol_count: palette.len(),
            });
        }

        let patterns: Vec<Pattern> = weights
            .iter()
            .enumerate()
            .map(|(symbol, &weight)| Pattern {
                pixels: vec![symbol as u8],
                size: 1,
                weight,
                transform: Transform::Identity,
            })
            .collect();

        let table = PropagatorTable::from_relation(relation, patterns.len());
        let statistics = SymbolStatistics::new(weights)?;

        Ok(Self {
            kind: ModelKind::Adjacency,
            pattern_size: 1,
            palette,
            patterns,
            table,
            statistics,
        })
    }

    /// Symbol model
    pub const fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Edge length of every pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Color of each label
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Symbols in id order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Number of symbols
    pub fn symbol_count(&self) -> usize {
        self.patterns.len()
    }

    /// Adjacency table
    pub const fn table(&self) -> &PropagatorTable {
        &self.table
    }

    /// Weight aggregates
    pub const fn statistics(&self) -> &SymbolStatistics {
        &self.statistics
    }

    /// Color of a symbol's pixel at offset `(dx, dy)`
    pub fn color_at(&self, symbol: usize, dx: usize, dy: usize) -> Option<Color> {
        let label = self.patterns.get(symbol)?.pixel(dx, dy)?;
        self.palette.get(usize::from(label)).copied()
    }
}

// Translate an observed label relation into symbol ids
fn relabel(
    observed: &CompatibilityRelation,
    patterns: &[Pattern],
    color_count: usize,
) -> CompatibilityRelation {
    let mut symbol_of_label = vec![None; color_count];
    for (symbol, pattern) in patterns.iter().enumerate() {
        if let Some(slot) = pattern
            .pixels
            .first()
            .and_then(|&label| symbol_of_label.get_mut(usize::from(label)))
        {
            *slot = Some(symbol);
        }
    }

    let mut relation = CompatibilityRelation::new();
    for &(a, b, direction) in observed.iter() {
        let symbols = symbol_of_label
            .get(a)
            .copied()
            .flatten()
            .zip(symbol_of_label.get(b).copied().flatten());
        if let Some((a, b)) = symbols {
            relation.allow(a, b, direction);
        }
    }
    relation
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`
    pub fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Weighted random selection restricted to allowed indices
    pub fn weighted_choice(
        &mut self,
        weights: &[f64],
        allowed: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let random_source = self.next_unit();
        weighted_index(weights, allowed, random_source)
    }
}

/// Outcome of one solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every eligible cell was decided without contradiction
    Succeeded,
    /// Some cell lost every possible symbol
    Contradiction,
    /// The iteration limit stopped the run before it finished
    LimitReached,
}

impl SolveStatus {
    /// Whether the run produced a complete assignment
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Contradiction => f.write_str("contradiction"),
            Self::LimitReached => f.write_str("iteration limit reached"),
        }
    }
}

/// Map a signed iteration limit to an optional bound; negative is unbounded
pub fn iteration_limit(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok()
}

/// Wave function collapse solver over one model and output grid
///
/// The wave, worklist and selector are allocated once and reset at the
/// start of every [`WaveCollapse::run`], so one solver serves many seeds.
pub struct WaveCollapse {
    model: Model,
    topology: Topology,
    wave: Wave,
    propagator: Propagator,
    selector: CellSelector,
    ground: bool,
    observed: Option<Vec<usize>>,
    iterations: usize,
}

impl WaveCollapse {
    /// Create a solver for the output described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the output dimensions are invalid for the
    /// model's pattern size.
    pub fn new(model: Model, config: &AlgorithmConfig) -> Result<Self> {
        config.validate_output(model.pattern_size())?;

        let topology = Topology::new(
            config.width,
            config.height,
            model.pattern_size(),
            config.periodic_output,
        );
        let wave = Wave::new(topology.cell_count(), model.table(), model.statistics());
        let propagator = Propagator::new(topology.cell_count(), model.symbol_count());

        Ok(Self {
            model,
            topology,
            wave,
            propagator,
            selector: CellSelector::new(config.heuristic),
            ground: config.ground,
            observed: None,
            iterations: 0,
        })
    }

    /// Solve from scratch with the given seed
    ///
    /// `limit` caps the number of collapses; `None` runs to completion.
    pub fn run(&mut self, seed: u64, limit: Option<usize>) -> SolveStatus {
        let mut random = RandomSelector::new(seed);
        self.observed = None;
        self.iterations = 0;

        if self.reset().is_err() {
            return SolveStatus::Contradiction;
        }

        loop {
            if limit.is_some_and(|limit| self.iterations >= limit) {
                return SolveStatus::LimitReached;
            }

            let Some(cell) = self
                .selector
                .next_cell(&self.wave, &self.topology, &mut random)
            else {
                return self.finalize();
            };

            self.iterations += 1;
            self.collapse(cell, &mut random);

            let propagated = self.propagator.propagate(
                &mut self.wave,
                self.model.table(),
                &self.topology,
                self.model.statistics(),
            );
            if propagated.is_err() {
                return SolveStatus::Contradiction;
            }
        }
    }

    // Restore the all-possible wave and apply ground
    fn reset(&mut self) -> std::result::Result<(), Contradiction> {
        let statistics = self.model.statistics();
        self.wave.reset(self.model.table(), statistics);
        self.propagator.clear();
        self.selector.reset();

        if self.ground {
            let floor = self.model.symbol_count().saturating_sub(1);
            let bottom = self.topology.height.saturating_sub(1);
            for x in 0..self.topology.width {
                let cell = self.topology.index(x, bottom);
                for symbol in 0..floor {
                    self.propagator.ban(&mut self.wave, statistics, cell, symbol);
                }
                for y in 0..bottom {
                    let cell = self.topology.index(x, y);
                    self.propagator.ban(&mut self.wave, statistics, cell, floor);
                }
            }
        }

        self.propagator.propagate(
            &mut self.wave,
            self.model.table(),
            &self.topology,
            statistics,
        )
    }

    // Keep one weighted-random symbol at `cell` and ban the rest
    fn collapse(&mut self, cell: usize, random: &mut RandomSelector) {
        let statistics = self.model.statistics();
        let wave = &self.wave;
        let Some(chosen) =
            random.weighted_choice(statistics.weights(), |symbol| wave.is_possible(cell, symbol))
        else {
            return;
        };

        for symbol in self.wave.possible_symbols(cell) {
            if symbol != chosen {
                self.propagator.ban(&mut self.wave, statistics, cell, symbol);
            }
        }
    }

    fn finalize(&mut self) -> SolveStatus {
        let observed: Option<Vec<usize>> = (0..self.wave.cell_count())
            .map(|cell| self.wave.first_possible(cell))
            .collect();

        match observed {
            Some(observed) => {
                self.observed = Some(observed);
                SolveStatus::Succeeded
            }
            None => SolveStatus::Contradiction,
        }
    }

    /// Render the current state as colors, shaped `(height, width)`
    pub fn render(&self) -> Array2<Color> {
        reconstruction::render(
            &self.model,
            &self.wave,
            &self.topology,
            self.observed.as_deref(),
        )
    }

    /// Symbol chosen for each cell after a successful run
    pub fn observed(&self) -> Option<&[usize]> {
        self.observed.as_deref()
    }

    /// Current wave
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Model being solved
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Output geometry
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Collapses performed by the last run
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Result of [`generate`]
#[derive(Debug, Clone)]
pub struct Generation {
    /// How the solve ended
    pub status: SolveStatus,
    /// Output colors, shaped `(height, width)`
    pub image: Array2<Color>,
    /// Collapses performed
    pub iterations: usize,
}

/// Learn a model from `sample` and solve it once
///
/// `limit` is the signed iteration limit; negative means unbounded.
///
/// # Errors
///
/// Returns an error if the configuration is rejected before solving.
pub fn generate(
    sample: &Array2<Color>,
    config: &AlgorithmConfig,
    seed: u64,
    limit: i64,
) -> Result<Generation> {
    let model = Model::from_sample(sample, config)?;
    let mut solver = WaveCollapse::new(model, config)?;
    let status = solver.run(seed, iteration_limit(limit));

    Ok(Generation {
        status,
        image: solver.render(),
        iterations: solver.iterations(),
    })
}

//! Algorithm constants and runtime configuration defaults

use crate::spatial::grid::Color;

/// Pattern edge length used by the overlapping model when none is given
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Symmetry variants kept per extracted pattern when none is given
pub const DEFAULT_SYMMETRY: usize = 8;

/// Symmetry counts accepted by pattern extraction
pub const VALID_SYMMETRIES: [usize; 4] = [1, 2, 4, 8];

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Largest number of distinct colors a sample may contain
pub const MAX_PALETTE_SIZE: usize = 256;

// Only breaks ties; must stay well below the smallest entropy difference
/// Upper bound of the random jitter added to cell scores during selection
pub const ENTROPY_NOISE: f64 = 1e-6;

/// Color emitted for output pixels no (cell, symbol) pair can explain
pub const UNKNOWN_COLOR: Color = [0, 0, 0, 0];

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default iteration limit (negative means unbounded)
pub const DEFAULT_ITERATION_LIMIT: i64 = -1;

/// Number of seeds tried per input before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

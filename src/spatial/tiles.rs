//! Pattern extraction and overlap matching
//!
//! Extracts overlapping square patterns from a labeled sample and deduplicates
//! them into weighted symbols. Supports the eight square symmetries
//! (rotations combined with reflection) to increase pattern variety from
//! limited sample data.

use crate::spatial::grid::Direction;
use ndarray::Array2;
use std::collections::HashMap;

/// One of the eight square symmetries, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Unchanged
    Identity,
    /// Horizontal mirror
    Reflect,
    /// Quarter turn
    Rotate,
    /// Quarter turn then mirror
    RotateReflect,
    /// Half turn
    Rotate2,
    /// Half turn then mirror
    Rotate2Reflect,
    /// Three quarter turn
    Rotate3,
    /// Three quarter turn then mirror
    Rotate3Reflect,
}

impl Transform {
    /// All symmetries in the order they are generated and truncated
    pub const ALL: [Self; 8] = [
        Self::Identity,
        Self::Reflect,
        Self::Rotate,
        Self::RotateReflect,
        Self::Rotate2,
        Self::Rotate2Reflect,
        Self::Rotate3,
        Self::Rotate3Reflect,
    ];

    const fn quarter_turns(self) -> usize {
        match self {
            Self::Identity | Self::Reflect => 0,
            Self::Rotate | Self::RotateReflect => 1,
            Self::Rotate2 | Self::Rotate2Reflect => 2,
            Self::Rotate3 | Self::Rotate3Reflect => 3,
        }
    }

    const fn mirrored(self) -> bool {
        matches!(
            self,
            Self::Reflect | Self::RotateReflect | Self::Rotate2Reflect | Self::Rotate3Reflect
        )
    }

    /// Apply this symmetry to a square block of `size * size` pixels
    pub fn apply(self, pixels: &[u8], size: usize) -> Vec<u8> {
        let mut result = pixels.to_vec();
        for _ in 0..self.quarter_turns() {
            result = rotate(&result, size);
        }
        if self.mirrored() {
            result = reflect(&result, size);
        }
        result
    }

    /// Where a neighbour offset ends up once this symmetry is applied
    pub const fn apply_to_direction(self, direction: Direction) -> Direction {
        let mut result = direction;
        let mut turns = self.quarter_turns();
        while turns > 0 {
            result = result.rotated();
            turns -= 1;
        }
        if self.mirrored() {
            result = result.reflected();
        }
        result
    }
}

/// A square block of dense color indices treated as one symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Row-major color indices
    pub pixels: Vec<u8>,
    /// Edge length
    pub size: usize,
    /// Number of times the pattern was observed (including symmetry variants)
    pub weight: f64,
    /// Symmetry under which the pattern was first observed
    pub transform: Transform,
}

impl Pattern {
    /// Color index at a pixel offset inside the pattern
    pub fn pixel(&self, dx: usize, dy: usize) -> Option<u8> {
        if dx >= self.size || dy >= self.size {
            return None;
        }
        self.pixels.get(dx + dy * self.size).copied()
    }
}

/// Pattern extractor managing deduplicated, weighted sample patterns
pub struct PatternExtractor {
    patterns: Vec<Pattern>,
    color_count: usize,
}

impl PatternExtractor {
    /// Extract patterns from a labeled sample
    ///
    /// Slides a `pattern_size` window across the sample in row-major order,
    /// wrapping around the edges when `periodic_input` is set. Each window
    /// contributes its first `symmetry` variants; repeated patterns only
    /// increase the weight of the first occurrence.
    pub fn extract(
        labels: &Array2<u8>,
        pattern_size: usize,
        symmetry: usize,
        periodic_input: bool,
    ) -> Self {
        let (rows, cols) = labels.dim();
        let color_count = labels.iter().map(|&c| usize::from(c) + 1).max().unwrap_or(0);

        let (x_max, y_max) = if periodic_input {
            (cols, rows)
        } else {
            (
                (cols + 1).saturating_sub(pattern_size),
                (rows + 1).saturating_sub(pattern_size),
            )
        };

        let mut patterns: Vec<Pattern> = Vec::new();
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();

        for y in 0..y_max {
            for x in 0..x_max {
                let base = window(labels, x, y, pattern_size);

                for transform in Transform::ALL.iter().take(symmetry) {
                    let pixels = transform.apply(&base, pattern_size);
                    let hash = pattern_hash(&pixels, color_count);
                    let bucket = buckets.entry(hash).or_default();

                    // Hash collisions between distinct pixel blocks get separate symbols
                    let existing = bucket.iter().copied().find(|&index| {
                        patterns
                            .get(index)
                            .is_some_and(|pattern| pattern.pixels == pixels)
                    });

                    match existing.and_then(|index| patterns.get_mut(index)) {
                        Some(pattern) => pattern.weight += 1.0,
                        None => {
                            bucket.push(patterns.len());
                            patterns.push(Pattern {
                                pixels,
                                size: pattern_size,
                                weight: 1.0,
                                transform: *transform,
                            });
                        }
                    }
                }
            }
        }

        Self {
            patterns,
            color_count,
        }
    }

    /// Get all extracted patterns in symbol order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Number of distinct colors in the sample
    pub const fn color_count(&self) -> usize {
        self.color_count
    }

    /// Consume the extractor and return its patterns
    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }
}

/// Read a square window at `(x, y)`, wrapping around the sample edges
fn window(labels: &Array2<u8>, x: usize, y: usize, size: usize) -> Vec<u8> {
    let (rows, cols) = labels.dim();
    let mut pixels = Vec::with_capacity(size * size);
    for dy in 0..size {
        for dx in 0..size {
            let row = (y + dy) % rows.max(1);
            let col = (x + dx) % cols.max(1);
            pixels.push(labels.get((row, col)).copied().unwrap_or(0));
        }
    }
    pixels
}

/// Positional hash of a pattern, reading pixels as digits in base `color_count`
///
/// The first pixel is the most significant digit. Arithmetic wraps, so large
/// patterns over large palettes may collide; extraction resolves collisions by
/// comparing pixels.
pub fn pattern_hash(pixels: &[u8], color_count: usize) -> u64 {
    let base = color_count as u64;
    pixels.iter().fold(0u64, |hash, &pixel| {
        hash.wrapping_mul(base).wrapping_add(u64::from(pixel))
    })
}

/// Rotate a square block a quarter turn
pub fn rotate(pixels: &[u8], size: usize) -> Vec<u8> {
    let mut rotated = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let source = size - 1 - y + x * size;
            rotated.push(pixels.get(source).copied().unwrap_or(0));
        }
    }
    rotated
}

/// Mirror a square block horizontally
pub fn reflect(pixels: &[u8], size: usize) -> Vec<u8> {
    let mut reflected = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let source = size - 1 - x + y * size;
            reflected.push(pixels.get(source).copied().unwrap_or(0));
        }
    }
    reflected
}

/// Whether `second` may sit next to `first` in `direction`
///
/// Shifting `second` by the direction's offset over `first`, every pixel in
/// the overlap must agree. Patterns of size 1 have no overlap and always
/// agree.
pub fn patterns_agree(first: &Pattern, second: &Pattern, direction: Direction) -> bool {
    let size = first.size as i32;
    let (dx, dy) = direction.offset();

    let (min_x, max_x) = if dx < 0 { (0, dx + size) } else { (dx, size) };
    let (min_y, max_y) = if dy < 0 { (0, dy + size) } else { (dy, size) };

    for y in min_y..max_y {
        for x in min_x..max_x {
            let a = first.pixels.get((x + size * y) as usize);
            let b = second.pixels.get((x - dx + size * (y - dy)) as usize);
            if a != b {
                return false;
            }
        }
    }
    true
}

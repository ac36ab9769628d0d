//! Turning a wave back into output colors
//!
//! A fully collapsed wave is read pattern by pattern. Anything else is either
//! read from each cell's first remaining symbol (adjacency model) or blended
//! from every pattern that could still cover a pixel (overlapping model).

use crate::algorithm::executor::{Model, ModelKind};
use crate::algorithm::wave::Wave;
use crate::io::configuration::UNKNOWN_COLOR;
use crate::spatial::grid::{Color, Topology};
use ndarray::Array2;

/// Render the output grid, shaped `(height, width)`
///
/// `observed` holds one symbol per cell after a successful run.
pub fn render(
    model: &Model,
    wave: &Wave,
    topology: &Topology,
    observed: Option<&[usize]>,
) -> Array2<Color> {
    match (observed, model.kind()) {
        (Some(observed), _) => render_observed(model, topology, observed),
        (None, ModelKind::Adjacency) => render_first_remaining(model, wave, topology),
        (None, ModelKind::Overlapping) => render_blended(model, wave, topology),
    }
}

/// Read every pixel from the one pattern chosen to cover it
///
/// Pixels in the last `P - 1` columns or rows are read from the pattern
/// anchored `P - 1` cells before them, so no pattern hangs off the grid.
pub fn render_observed(model: &Model, topology: &Topology, observed: &[usize]) -> Array2<Color> {
    let size = model.pattern_size();
    let (width, height) = (topology.width, topology.height);

    Array2::from_shape_fn((height, width), |(y, x)| {
        let dx = if x + size <= width { 0 } else { size - 1 };
        let dy = if y + size <= height { 0 } else { size - 1 };
        let anchor_x = wrap(x, dx, width);
        let anchor_y = wrap(y, dy, height);

        observed
            .get(topology.index(anchor_x, anchor_y))
            .and_then(|&symbol| model.color_at(symbol, dx, dy))
            .unwrap_or(UNKNOWN_COLOR)
    })
}

/// Color each cell with its lowest remaining symbol
pub fn render_first_remaining(model: &Model, wave: &Wave, topology: &Topology) -> Array2<Color> {
    Array2::from_shape_fn((topology.height, topology.width), |(y, x)| {
        wave.first_possible(topology.index(x, y))
            .and_then(|symbol| model.color_at(symbol, 0, 0))
            .unwrap_or(UNKNOWN_COLOR)
    })
}

/// Average every (anchor, possible pattern) pair covering each pixel
///
/// Channels, alpha included, are averaged with integer division. Pixels no
/// pair covers get [`UNKNOWN_COLOR`].
pub fn render_blended(model: &Model, wave: &Wave, topology: &Topology) -> Array2<Color> {
    let size = model.pattern_size();
    let (width, height) = (topology.width, topology.height);

    Array2::from_shape_fn((height, width), |(y, x)| {
        let mut totals = [0u32; 4];
        let mut contributors = 0u32;

        for dy in 0..size {
            for dx in 0..size {
                if !topology.periodic && (x < dx || y < dy) {
                    continue;
                }
                let anchor = topology.index(wrap(x, dx, width), wrap(y, dy, height));
                if !topology.is_anchor(anchor) {
                    continue;
                }

                for symbol in wave.possible_symbols(anchor) {
                    let Some(color) = model.color_at(symbol, dx, dy) else {
                        continue;
                    };
                    for (total, channel) in totals.iter_mut().zip(color) {
                        *total += u32::from(channel);
                    }
                    contributors += 1;
                }
            }
        }

        if contributors == 0 {
            return UNKNOWN_COLOR;
        }
        totals.map(|total| (total / contributors) as u8)
    })
}

// Step back `offset` cells from `position`, wrapping around `extent`
const fn wrap(position: usize, offset: usize, extent: usize) -> usize {
    if extent == 0 {
        return 0;
    }
    (position + extent * (offset / extent + 1) - offset) % extent
}

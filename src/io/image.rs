//! PNG export of generated color grids

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Color;
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Export a `(rows, cols)` color grid as an RGBA PNG
///
/// # Errors
///
/// Returns an error if:
/// - The grid is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png<P: AsRef<Path>>(grid: &Array2<Color>, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return Err(AlgorithmError::EmptyGrid { rows, cols });
    }

    let img = ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
        Rgba(
            grid.get((y as usize, x as usize))
                .copied()
                .unwrap_or([0, 0, 0, 0]),
        )
    });

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

//! Sample image processing into dense color labels

use crate::io::configuration::MAX_PALETTE_SIZE;
use crate::io::error::{AlgorithmError, Result, invalid_sample};
use crate::spatial::grid::Color;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// Converts sample grids to dense color labels
///
/// Colors are numbered in first-seen row-major order, so the last color to
/// appear in a scan of the sample receives the highest label.
#[derive(Debug, Clone)]
pub struct SampleProcessor {
    labels: Array2<u8>,
    palette: Vec<Color>,
}

impl SampleProcessor {
    /// Load and process a sample from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or decoded
    /// - The image is empty or has more distinct colors than supported
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        let mut sample = Array2::from_elem((height, width), [0u8; 4]);
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            if let Some(cell) = sample.get_mut((y as usize, x as usize)) {
                *cell = pixel.0;
            }
        }

        Self::from_grid(&sample)
    }

    /// Process an in-memory sample grid (rows, cols)
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is empty or has more than
    /// `MAX_PALETTE_SIZE` distinct colors.
    pub fn from_grid(sample: &Array2<Color>) -> Result<Self> {
        let (height, width) = sample.dim();
        if height == 0 || width == 0 {
            return Err(invalid_sample(&"Sample grid is empty"));
        }

        let mut palette: Vec<Color> = Vec::new();
        let mut color_mapping: HashMap<Color, u8> = HashMap::new();
        let mut labels = Array2::zeros((height, width));

        for ((row, col), color) in sample.indexed_iter() {
            let label = match color_mapping.get(color) {
                Some(&label) => label,
                None => {
                    if palette.len() >= MAX_PALETTE_SIZE {
                        return Err(invalid_sample(&format!(
                            "Sample has more than {MAX_PALETTE_SIZE} distinct colors"
                        )));
                    }
                    let label = palette.len() as u8;
                    color_mapping.insert(*color, label);
                    palette.push(*color);
                    label
                }
            };
            if let Some(cell) = labels.get_mut((row, col)) {
                *cell = label;
            }
        }

        Ok(Self { labels, palette })
    }

    /// Get the labeled sample grid
    pub const fn labels(&self) -> &Array2<u8> {
        &self.labels
    }

    /// Get the color of each label
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Number of distinct colors
    pub fn color_count(&self) -> usize {
        self.palette.len()
    }

    /// Consume the processor and return labels and palette
    pub fn into_parts(self) -> (Array2<u8>, Vec<Color>) {
        (self.labels, self.palette)
    }
}

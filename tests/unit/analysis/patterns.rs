//! Tests for sample loading and color labeling

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use ndarray::{Array2, array};
    use tempfile::TempDir;
    use wavecollapse::AlgorithmError;
    use wavecollapse::analysis::patterns::SampleProcessor;

    const A: [u8; 4] = [10, 20, 30, 255];
    const B: [u8; 4] = [200, 0, 0, 255];
    const C: [u8; 4] = [0, 0, 0, 0];

    // Tests labels follow first-seen row-major color order
    // Verified by sorting the palette
    #[test]
    fn test_from_grid_first_seen_order() {
        let sample = array![[B, A], [A, C]];
        let processor = SampleProcessor::from_grid(&sample).unwrap();

        assert_eq!(processor.palette(), &[B, A, C]);
        assert_eq!(processor.labels(), &array![[0u8, 1], [1, 2]]);
        assert_eq!(processor.color_count(), 3);
    }

    // Tests empty samples are rejected
    // Verified by removing the emptiness check
    #[test]
    fn test_from_grid_rejects_empty() {
        let sample: Array2<[u8; 4]> = Array2::from_elem((0, 0), A);
        assert!(matches!(
            SampleProcessor::from_grid(&sample),
            Err(AlgorithmError::InvalidSample { .. })
        ));
    }

    // Tests palettes above the label range are rejected
    // Verified by letting labels wrap past 255
    #[test]
    fn test_from_grid_rejects_large_palette() {
        let sample = Array2::from_shape_fn((1, 257), |(_, col)| {
            [(col % 256) as u8, (col / 256) as u8, 0, 255]
        });
        assert!(SampleProcessor::from_grid(&sample).is_err());

        let fits = Array2::from_shape_fn((1, 256), |(_, col)| [col as u8, 0, 0, 255]);
        let processor = SampleProcessor::from_grid(&fits).unwrap();
        assert_eq!(processor.color_count(), 256);
    }

    // Tests PNG samples load with rows as y and columns as x
    // Verified by transposing the loaded grid
    #[test]
    fn test_from_png_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.png");
        let img = RgbaImage::from_fn(3, 2, |x, _| if x == 2 { Rgba(B) } else { Rgba(A) });
        img.save(&path).unwrap();

        let (labels, palette) = SampleProcessor::from_png_file(&path).unwrap().into_parts();
        assert_eq!(labels.dim(), (2, 3));
        assert_eq!(palette, vec![A, B]);
        assert_eq!(labels, array![[0u8, 0, 1], [0, 0, 1]]);
    }

    // Tests missing files surface as image load errors
    // Verified by mapping the error to InvalidSample
    #[test]
    fn test_from_png_file_missing() {
        let dir = TempDir::new().unwrap();
        let result = SampleProcessor::from_png_file(dir.path().join("missing.png"));
        assert!(matches!(result, Err(AlgorithmError::ImageLoad { .. })));
    }
}

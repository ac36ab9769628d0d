//! Tests for PNG export of color grids

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use tempfile::TempDir;
    use wavecollapse::AlgorithmError;
    use wavecollapse::io::image::export_grid_as_png;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    // Tests exported pixels match the grid, including transparency
    // Verified by swapping x and y when writing pixels
    #[test]
    fn test_export_round_trips_pixels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let grid: Array2<[u8; 4]> = array![[RED, CLEAR, RED], [CLEAR, CLEAR, RED]];

        export_grid_as_png(&grid, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, RED);
        assert_eq!(img.get_pixel(1, 0).0, CLEAR);
        assert_eq!(img.get_pixel(2, 1).0, RED);
        assert_eq!(img.get_pixel(0, 1).0, CLEAR);
    }

    // Tests missing parent directories are created
    // Verified by removing directory creation
    #[test]
    fn test_export_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.png");
        let grid = Array2::from_elem((2, 2), RED);

        export_grid_as_png(&grid, &path).unwrap();
        assert!(path.exists());
    }

    // Tests an empty grid is rejected instead of writing a 0x0 image
    // Verified by removing the emptiness check
    #[test]
    fn test_export_empty_grid_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        let grid: Array2<[u8; 4]> = Array2::from_elem((0, 3), RED);

        let result = export_grid_as_png(&grid, &path);
        assert!(matches!(
            result,
            Err(AlgorithmError::EmptyGrid { .. })
        ));
        assert!(!path.exists());
    }
}

//! Tests for algorithm configuration constants

#[cfg(test)]
mod tests {
    use wavecollapse::io::configuration::{
        DEFAULT_ATTEMPTS, DEFAULT_ITERATION_LIMIT, DEFAULT_PATTERN_SIZE, DEFAULT_SEED,
        DEFAULT_SYMMETRY, ENTROPY_NOISE, MAX_GRID_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS,
        MAX_PALETTE_SIZE, OUTPUT_SUFFIX, UNKNOWN_COLOR, VALID_SYMMETRIES,
    };

    // Tests default symmetry is one of the accepted values
    // Verified by setting default symmetry to 3
    #[test]
    fn test_default_symmetry_is_valid() {
        assert!(VALID_SYMMETRIES.contains(&DEFAULT_SYMMETRY));
        assert_eq!(VALID_SYMMETRIES, [1, 2, 4, 8]);
    }

    // Tests default pattern size
    // Verified by changing constant value
    #[test]
    fn test_default_pattern_size() {
        assert_eq!(DEFAULT_PATTERN_SIZE, 3);
    }

    // Tests default iteration limit is unbounded
    // Verified by making the default limit positive
    #[test]
    fn test_default_iteration_limit_unbounded() {
        assert!(DEFAULT_ITERATION_LIMIT < 0);
        assert!(DEFAULT_ATTEMPTS >= 1);
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests jitter stays a tie breaker
    // Verified by raising noise to 1.0
    #[test]
    fn test_entropy_noise_is_tiny() {
        assert!(ENTROPY_NOISE > 0.0);
        assert!(ENTROPY_NOISE < 1e-3);
    }

    // Tests unknown color is fully transparent
    // Verified by making the unknown color opaque
    #[test]
    fn test_unknown_color_transparent() {
        assert_eq!(UNKNOWN_COLOR, [0, 0, 0, 0]);
    }

    // Tests size limits
    // Verified by reducing limits
    #[test]
    fn test_limits() {
        assert_eq!(MAX_GRID_DIMENSION, 10_000);
        assert_eq!(MAX_PALETTE_SIZE, 256);
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
    }

    // Tests output suffix
    // Verified by changing suffix
    #[test]
    fn test_output_suffix() {
        assert_eq!(OUTPUT_SUFFIX, "_result");
    }
}

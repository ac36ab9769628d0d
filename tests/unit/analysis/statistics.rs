//! Tests for symbol weight aggregates

#[cfg(test)]
mod tests {
    use wavecollapse::AlgorithmError;
    use wavecollapse::analysis::statistics::SymbolStatistics;

    // Tests global sums and the starting entropy
    // Verified by dropping the ln(W) term
    #[test]
    fn test_aggregates() {
        let statistics = SymbolStatistics::new(vec![1.0, 3.0]).unwrap();

        assert_eq!(statistics.symbol_count(), 2);
        assert_eq!(statistics.sum_of_weights(), 4.0);
        assert!((statistics.sum_of_weight_log_weights() - 3.0 * 3f64.ln()).abs() < 1e-12);
        assert!((statistics.weight_log_weight(0)).abs() < 1e-12);

        let expected = 4f64.ln() - 3.0 * 3f64.ln() / 4.0;
        assert!((statistics.starting_entropy() - expected).abs() < 1e-12);
    }

    // Tests a single symbol has zero entropy
    // Verified by returning ln(W) alone
    #[test]
    fn test_single_symbol_entropy() {
        let statistics = SymbolStatistics::new(vec![5.0]).unwrap();
        assert!(statistics.starting_entropy().abs() < 1e-12);
    }

    // Tests uniform weights give ln(n)
    // Verified by normalizing with the wrong total
    #[test]
    fn test_uniform_entropy() {
        let statistics = SymbolStatistics::new(vec![2.0; 4]).unwrap();
        assert!((statistics.starting_entropy() - 4f64.ln()).abs() < 1e-12);
        assert_eq!(statistics.weights(), &[2.0; 4]);
    }

    // Tests out-of-range lookups contribute nothing
    // Verified by indexing without bounds checks
    #[test]
    fn test_out_of_range_symbol() {
        let statistics = SymbolStatistics::new(vec![1.0]).unwrap();
        assert_eq!(statistics.weight(3), 0.0);
        assert_eq!(statistics.weight_log_weight(3), 0.0);
    }

    // Tests invalid weight sets are rejected
    // Verified by accepting zero weights
    #[test]
    fn test_rejects_invalid_weights() {
        assert!(matches!(
            SymbolStatistics::new(Vec::new()),
            Err(AlgorithmError::InvalidSample { .. })
        ));
        assert!(SymbolStatistics::new(vec![1.0, 0.0]).is_err());
        assert!(SymbolStatistics::new(vec![-1.0]).is_err());
        assert!(SymbolStatistics::new(vec![f64::NAN]).is_err());
        assert!(matches!(
            SymbolStatistics::new(vec![f64::MAX, f64::MAX]),
            Err(AlgorithmError::Numerical { .. })
        ));
    }
}

/// Shannon entropy of a weighted distribution from its running sums
///
/// With `W = Σw` and `L = Σ w·ln(w)`, the entropy of the normalized
/// distribution is `ln(W) − L / W`. An empty distribution has zero entropy.
pub fn shannon_entropy(sum_of_weights: f64, sum_of_weight_log_weights: f64) -> f64 {
    if sum_of_weights <= 0.0 {
        return 0.0;
    }
    sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights
}

/// Entropy of a set of weights computed directly
///
/// Used to check incrementally maintained aggregates against a fresh sum.
pub fn entropy_of(weights: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, sum_log) = weights
        .into_iter()
        .fold((0.0, 0.0), |(sum, sum_log), w| (sum + w, w.mul_add(w.ln(), sum_log)));
    shannon_entropy(sum, sum_log)
}

/// Weighted random selection among the allowed entries
///
/// `r` is a uniform draw in `[0, 1)`. Scans the allowed entries accumulating
/// weight and returns the first whose cumulative weight reaches `r · total`.
/// Returns `None` when nothing is allowed.
pub fn weighted_index(
    weights: &[f64],
    allowed: impl Fn(usize) -> bool,
    random_source: f64,
) -> Option<usize> {
    let total: f64 = weights
        .iter()
        .enumerate()
        .filter(|&(i, _)| allowed(i))
        .map(|(_, &w)| w)
        .sum();

    let threshold = random_source * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &weight) in weights.iter().enumerate() {
        if !allowed(i) {
            continue;
        }
        cumulative += weight;
        last = Some(i);
        if cumulative >= threshold {
            return last;
        }
    }

    // Rounding can leave the threshold just above the final cumulative sum
    last
}

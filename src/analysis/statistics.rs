//! Weight aggregates shared by every cell of the wave

use crate::io::error::{Result, invalid_sample, numerical_error};
use crate::math::probability::shannon_entropy;

/// Per-symbol weights and the global sums the wave starts from
///
/// Each cell of a freshly reset wave has every symbol possible, so its
/// aggregates equal the global sums stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStatistics {
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    sum_of_weights: f64,
    sum_of_weight_log_weights: f64,
    starting_entropy: f64,
}

impl SymbolStatistics {
    /// Precompute aggregates for a set of symbol weights
    ///
    /// # Errors
    ///
    /// Returns an error if there are no symbols, any weight is not a
    /// positive finite number, or the weights overflow the entropy sums.
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(invalid_sample(&"No symbols were extracted from the sample"));
        }
        if let Some((index, weight)) = weights
            .iter()
            .enumerate()
            .find(|&(_, &w)| !(w.is_finite() && w > 0.0))
        {
            return Err(invalid_sample(&format!(
                "Symbol {index} has non-positive weight {weight}"
            )));
        }

        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| w * w.ln()).collect();
        let sum_of_weights: f64 = weights.iter().sum();
        let sum_of_weight_log_weights: f64 = weight_log_weights.iter().sum();
        let starting_entropy = shannon_entropy(sum_of_weights, sum_of_weight_log_weights);
        if !starting_entropy.is_finite() {
            return Err(numerical_error(
                "starting entropy",
                &format!("total weight {sum_of_weights} gives entropy {starting_entropy}"),
            ));
        }

        Ok(Self {
            weights,
            weight_log_weights,
            sum_of_weights,
            sum_of_weight_log_weights,
            starting_entropy,
        })
    }

    /// Number of symbols
    pub fn symbol_count(&self) -> usize {
        self.weights.len()
    }

    /// Weight of every symbol
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of a symbol, zero when out of range
    pub fn weight(&self, symbol: usize) -> f64 {
        self.weights.get(symbol).copied().unwrap_or(0.0)
    }

    /// `weight · ln(weight)` of a symbol, zero when out of range
    pub fn weight_log_weight(&self, symbol: usize) -> f64 {
        self.weight_log_weights.get(symbol).copied().unwrap_or(0.0)
    }

    /// Sum of all weights
    pub const fn sum_of_weights(&self) -> f64 {
        self.sum_of_weights
    }

    /// Sum of all `weight · ln(weight)`
    pub const fn sum_of_weight_log_weights(&self) -> f64 {
        self.sum_of_weight_log_weights
    }

    /// Entropy of a cell where every symbol is possible
    pub const fn starting_entropy(&self) -> f64 {
        self.starting_entropy
    }
}

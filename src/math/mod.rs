//! Mathematical utilities for the algorithm

/// Entropy and weighted sampling
pub mod probability;

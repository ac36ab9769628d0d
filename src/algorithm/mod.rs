/// Dense per-cell symbol sets
pub mod bitset;
/// Model construction and the solve loop
pub mod executor;
/// Worklist-based arc consistency
pub mod propagation;
/// Output color reconstruction from the wave
pub mod reconstruction;
/// Cell selection heuristics
pub mod selection;
/// Per-cell possibility state and aggregates
pub mod wave;

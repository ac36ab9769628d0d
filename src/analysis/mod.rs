//! Sample analysis: color labeling, adjacency rules and symbol weights

/// Sample image loading and color labeling
pub mod patterns;
/// Compatibility relations and propagator tables
pub mod rules;
/// Symbol weight aggregates
pub mod statistics;

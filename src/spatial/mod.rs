//! Spatial data structures and pattern geometry
//!
//! This module contains spatial-related functionality including:
//! - Directions and output topology
//! - Pattern extraction, symmetries and overlap matching

/// Directions, colors and grid topology
pub mod grid;
/// Pattern extraction and overlap matching
pub mod tiles;

pub use grid::{Color, Direction, Topology};

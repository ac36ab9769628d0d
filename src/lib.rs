//! Wave function collapse texture synthesis
//!
//! The system learns local patterns and adjacency rules from a sample image
//! and generates new images of any size that locally resemble it, using
//! entropy-guided collapse and counter-based constraint propagation.

#![forbid(unsafe_code)]

/// Wave, propagation, selection heuristics and the solve loop
pub mod algorithm;
/// Sample labeling, compatibility rules and symbol statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for entropy and weighted sampling
pub mod math;
/// Grid topology and pattern extraction utilities
pub mod spatial;

pub use algorithm::executor::{
    AlgorithmConfig, Generation, Model, ModelKind, SolveStatus, WaveCollapse, generate,
};
pub use io::error::{AlgorithmError, Result};

//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantGrowth, ExponentialDecay, TimeRamp};
pub use test_helpers::{constant_density_trap, occupancy_series, relative_error, run_trap};

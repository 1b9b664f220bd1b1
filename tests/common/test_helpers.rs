//! Helper functions for integration tests

use std::sync::Arc;

use trapmem_rs::experiment::{TrapMemoryConfig, TrapMemoryExperiment, TrapMemoryRun};
use trapmem_rs::models::{DensitySweep, TrapOccupancy};
use trapmem_rs::physics::PhysicalQuantity;
use trapmem_rs::solver::SimulationResult;

/// Trap model driven by a flat sweep at `10^log_density`
pub fn constant_density_trap(
    log_density: f64,
    capture_coefficient: f64,
    emission_rate: f64,
    initial_occupancy: f64,
    t_end: f64,
    samples: usize,
) -> TrapOccupancy {
    let sweep = DensitySweep::up_down(t_end, samples, log_density, log_density).unwrap();
    TrapOccupancy::new(capture_coefficient, emission_rate, initial_occupancy, Arc::new(sweep)).unwrap()
}

/// Occupancy trajectory of a solver result
pub fn occupancy_series(result: &SimulationResult) -> Vec<f64> {
    result.scalar_series(PhysicalQuantity::TrapOccupancy).unwrap()
}

/// Run the experiment, panicking on error
pub fn run_trap(config: &TrapMemoryConfig) -> TrapMemoryRun {
    TrapMemoryExperiment::run(config).unwrap()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

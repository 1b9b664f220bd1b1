//! Numerical solvers
//!
//! A numerical solver applies a time-stepping scheme to the equations
//! provided by a physical model within a specific scenario.
//!
//! # The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Domain boundaries (initial condition)
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Total simulated time and number of steps
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Publishes the current time to the model through state metadata
//!    - Asks the model to project every new state back into its domain
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Physical Model │  (equations)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Scenario        │ ← WHAT to solve
//! │ (model + bounds)│
//! └────────┬────────┘
//!          │
//! ┌────────▼─────────────┐
//! │ Solver Configuration │ ← HOW to solve
//! └────────┬─────────────┘
//!          │
//! ┌────────▼────────┐
//! │ Numerical Solver│ ← Euler or RK4
//! └────────┬────────┘
//!          │
//! ┌────────▼────────────┐
//! │ Simulation Result   │ ← trajectory + metadata
//! └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use trapmem_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
//! use trapmem_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration};
//!
//! struct Decay;
//!
//! impl PhysicalModel for Decay {
//!     fn points(&self) -> usize { 1 }
//!     fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
//!         let f = state.scalar(PhysicalQuantity::TrapOccupancy).unwrap_or(0.0);
//!         PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(-f))
//!     }
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(1.0))
//!     }
//!     fn name(&self) -> &str { "Decay" }
//! }
//!
//! let scenario = Scenario::from_model(Box::new(Decay));
//! let config = SolverConfiguration::time_evolution(1.0, 100);
//! let result = EulerSolver::new().solve(&scenario, &config).unwrap();
//!
//! assert_eq!(result.len(), 101);
//! assert!((result.time_points[100] - 1.0).abs() < 1e-12);
//! ```
//!
//! # Error Handling
//!
//! All solver methods return `Result<T, SimulationError>`. Common errors:
//! - Invalid configuration (non-positive total time)
//! - Invalid scenario (missing initial condition)
//! - Numerical instability (NaN or infinite values)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod scenario;
mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand work off to Rayon is an execution concern, so it
// lives with the solvers rather than in physics/data.rs. The value is a
// performance hint read with relaxed ordering.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of elements above which [`PhysicalData::apply()`] and the
/// recombination proxy switch to parallel iteration.
///
/// [`PhysicalData::apply()`]: crate::physics::PhysicalData::apply
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Element-wise kernels iterate sequentially below this size and switch to
/// Rayon above it, but only when the crate is compiled with the `parallel`
/// feature.
///
/// # Example
///
/// ```rust
/// use trapmem_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use trapmem_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that sets a threshold and restores the previous one on drop.
///
/// Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
};

pub use boundary::{DimensionBoundary, DomainBoundaries, TimeAxisConvention};
pub use scenario::Scenario;

pub use methods::{EulerSolver, RK4Solver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::SimulationError;
use crate::physics::PhysicalState;

/// Validate physical state for numerical issues
///
/// Fails on the first NaN or infinite component, naming the quantity and
/// the step where it appeared.
pub(crate) fn validate_state(state: &PhysicalState, step: usize) -> Result<(), SimulationError> {
    for (quantity, data) in state.iter() {
        if let Some(bad) = data.values().find(|x| !x.is_finite()) {
            let kind = if bad.is_nan() { "NaN" } else { "Infinity" };
            return Err(SimulationError::NonFinite {
                quantity: quantity.to_string(),
                step,
                kind,
            });
        }
    }

    Ok(())
}

/// Extract `(total_time, time_steps)` from a configuration or reject it
pub(crate) fn time_evolution_parameters(
    solver: &'static str,
    config: &SolverConfiguration,
) -> Result<(f64, usize), SimulationError> {
    match &config.solver_type {
        SolverType::TimeEvolution { total_time, time_steps } => Ok((*total_time, *time_steps)),
        other => Err(SimulationError::UnsupportedConfiguration {
            solver,
            requested: other.name().to_string(),
        }),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

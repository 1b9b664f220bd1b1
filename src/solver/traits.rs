//! Numerical solver traits and types
//!
//! # Design
//!
//! - Central enum `SolverType` defines the kind of numerical solution
//! - `SolverConfiguration` wraps a `SolverType`
//! - `SimulationResult` carries the trajectory plus string metadata
//! - `Solver` is the stable interface every time integrator implements

use std::collections::HashMap;

use crate::error::SimulationError;
use crate::physics::{PhysicalQuantity, PhysicalState};
use crate::solver::Scenario;

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Type of numerical solution method
///
/// # Examples
///
/// ```rust
/// use trapmem_rs::solver::SolverType;
///
/// // Time evolution: 20 s split into 3999 steps
/// let solver_type = SolverType::TimeEvolution {
///     total_time: 20.0,
///     time_steps: 3999,
/// };
/// assert!(solver_type.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub enum SolverType {

    /// Time evolution solution (ODE integration)
    ///
    /// Used by: Euler, Runge-Kutta
    ///
    /// # Parameters
    /// - `total_time`: Total simulation time (seconds)
    /// - `time_steps`: Number of time steps; zero yields the initial state only
    TimeEvolution {
        total_time: f64,
        time_steps: usize,
    },

    /// Custom solver type for specialized needs
    ///
    /// Carries named numeric parameters; the bundled solvers reject it.
    Custom(String, HashMap<String, f64>),
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::TimeEvolution { .. } => "TimeEvolution",
            SolverType::Custom(name, _) => name,
        }
    }

    /// Validate that parameters are physically meaningful
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            SolverType::TimeEvolution { total_time, .. } => {
                if !total_time.is_finite() || *total_time <= 0.0 {
                    return Err(SimulationError::invalid(format!(
                        "total time must be positive and finite, got {}",
                        total_time
                    )));
                }
                Ok(())
            }
            SolverType::Custom(_, parameters) => {
                for (key, value) in parameters {
                    if !value.is_finite() {
                        return Err(SimulationError::invalid(format!(
                            "parameter {} is not finite",
                            key
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for numerical solver
///
/// # Example
///
/// ```rust
/// use trapmem_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::time_evolution(20.0, 3999);
/// assert!(config.validate().is_ok());
/// assert!((config.time_step().unwrap() - 20.0 / 3999.0).abs() < 1e-15);
/// ```
#[derive(Clone, Debug)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create a time evolution configuration
    pub fn time_evolution(total_time: f64, time_steps: usize) -> Self {
        Self::new(SolverType::TimeEvolution { total_time, time_steps })
    }

    /// Step size `dt = total_time / time_steps` (0.0 for a zero-step run)
    pub fn time_step(&self) -> Option<f64> {
        match self.solver_type {
            SolverType::TimeEvolution { total_time, time_steps } => Some(if time_steps == 0 {
                0.0
            } else {
                total_time / time_steps as f64
            }),
            SolverType::Custom(..) => None,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.solver_type.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Result of a time integration
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Sampled times, `time_points[0] = 0`
    pub time_points: Vec<f64>,

    /// State at each time point (same length as `time_points`)
    pub state_trajectory: Vec<PhysicalState>,

    /// Last state of the trajectory
    pub final_state: PhysicalState,

    /// Number of steps where `PhysicalModel::enforce_bounds` corrected the state
    pub bound_corrections: usize,

    /// Free-form diagnostics (solver name, dt, steps, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result without metadata
    pub fn new(
        time_points: Vec<f64>,
        state_trajectory: Vec<PhysicalState>,
        final_state: PhysicalState,
    ) -> Self {
        Self {
            time_points,
            state_trajectory,
            final_state,
            bound_corrections: 0,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of stored time points
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// True when no time point is stored
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Extract a scalar quantity along the trajectory
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::MissingQuantity`] if any state lacks the
    /// quantity or stores it as a vector.
    pub fn scalar_series(&self, quantity: PhysicalQuantity) -> Result<Vec<f64>, SimulationError> {
        self.state_trajectory
            .iter()
            .map(|state| {
                state
                    .scalar(quantity)
                    .ok_or_else(|| SimulationError::MissingQuantity(quantity.to_string()))
            })
            .collect()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical solver interface
///
/// A solver is stateless: the same instance can integrate any number of
/// scenarios.
pub trait Solver {
    /// Integrate the scenario under the given configuration
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, SimulationError>;

    /// Human readable solver name
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Tests
// =================================================================================================

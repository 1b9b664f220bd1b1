//! Trap-memory experiment driver
//!
//! Wires the pieces of the crate into one run:
//!
//! ```text
//! TrapMemoryConfig ─► DensitySweep ─► TrapOccupancy ─► Solver ─► f(t)
//!                                                              │
//!                         RecombinationProxy (A·n·f) ◄─────────┘
//!                                   │
//!                             TrapMemoryRun ─► HysteresisLoop
//! ```
//!
//! # Example
//!
//! ```rust
//! use trapmem_rs::experiment::{TrapMemoryConfig, TrapMemoryExperiment};
//!
//! let run = TrapMemoryExperiment::run(&TrapMemoryConfig::default()).unwrap();
//! assert_eq!(run.len(), 4000);
//!
//! let hysteresis = run.hysteresis().unwrap();
//! assert!(!hysteresis.is_degenerate(1e-3));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::{HysteresisLoop, RecombinationProxy};
use crate::error::SimulationError;
use crate::models::{DensitySweep, StabilityReport, StepDiagnostics, TrapOccupancy};
use crate::physics::PhysicalQuantity;
use crate::solver::{EulerSolver, RK4Solver, Scenario, Solver, SolverConfiguration};

// =================================================================================================
// Integrator
// =================================================================================================

/// Time integrator used for the occupancy balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Forward Euler, the reference scheme
    #[default]
    ForwardEuler,

    /// Classical fourth-order Runge-Kutta
    RungeKutta4,
}

impl Integrator {
    /// Solver implementing this integrator
    pub fn solver(&self) -> Box<dyn Solver> {
        match self {
            Integrator::ForwardEuler => Box::new(EulerSolver::new()),
            Integrator::RungeKutta4 => Box::new(RK4Solver::new()),
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integrator::ForwardEuler => write!(f, "Forward Euler"),
            Integrator::RungeKutta4 => write!(f, "Runge-Kutta 4"),
        }
    }
}

// =================================================================================================
// Configuration
// =================================================================================================

/// Parameters of a trap-memory run
///
/// `Default` gives the reference experiment: 4000 samples over 20 s, density
/// swept between 1e14 and 1e17 cm⁻³, `kc = 5e-18 cm³/s`, `ke = 0.4 s⁻¹`,
/// `f0 = 0.05`, `A = 1e-20`, forward Euler.
///
/// # Example
///
/// ```rust
/// use trapmem_rs::experiment::{Integrator, TrapMemoryConfig};
///
/// let config = TrapMemoryConfig::default()
///     .with_samples(1000)
///     .with_rates(1e-17, 0.2)
///     .with_integrator(Integrator::RungeKutta4);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.samples, 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrapMemoryConfig {
    /// Simulated duration (s)
    pub t_end: f64,

    /// Number of samples `N`
    pub samples: usize,

    /// log10 of the lowest density (cm⁻³)
    pub logn_low: f64,

    /// log10 of the highest density (cm⁻³)
    pub logn_high: f64,

    /// Capture coefficient `kc` (cm³/s)
    pub capture_coefficient: f64,

    /// Emission rate `ke` (1/s)
    pub emission_rate: f64,

    /// Occupancy at `t = 0`
    pub initial_occupancy: f64,

    /// Recombination proxy scale `A`
    pub recombination_scale: f64,

    /// Time integrator
    pub integrator: Integrator,
}

impl Default for TrapMemoryConfig {
    fn default() -> Self {
        Self {
            t_end: 20.0,
            samples: 4000,
            logn_low: 14.0,
            logn_high: 17.0,
            capture_coefficient: 5e-18,
            emission_rate: 0.4,
            initial_occupancy: 0.05,
            recombination_scale: 1e-20,
            integrator: Integrator::ForwardEuler,
        }
    }
}

impl TrapMemoryConfig {
    /// Set the simulated duration
    pub fn with_duration(mut self, t_end: f64) -> Self {
        self.t_end = t_end;
        self
    }

    /// Set the number of samples
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the density exponents
    pub fn with_density_range(mut self, logn_low: f64, logn_high: f64) -> Self {
        self.logn_low = logn_low;
        self.logn_high = logn_high;
        self
    }

    /// Set the capture coefficient and the emission rate
    pub fn with_rates(mut self, capture_coefficient: f64, emission_rate: f64) -> Self {
        self.capture_coefficient = capture_coefficient;
        self.emission_rate = emission_rate;
        self
    }

    /// Set the initial occupancy
    pub fn with_initial_occupancy(mut self, initial_occupancy: f64) -> Self {
        self.initial_occupancy = initial_occupancy;
        self
    }

    /// Set the recombination proxy scale
    pub fn with_recombination_scale(mut self, scale: f64) -> Self {
        self.recombination_scale = scale;
        self
    }

    /// Set the time integrator
    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Check every parameter before any work is done
    pub fn validate(&self) -> Result<(), SimulationError> {
        let sweep = DensitySweep::up_down(self.t_end, self.samples, self.logn_low, self.logn_high)?;
        TrapOccupancy::new(
            self.capture_coefficient,
            self.emission_rate,
            self.initial_occupancy,
            Arc::new(sweep),
        )?;
        RecombinationProxy::new(self.recombination_scale)?;
        Ok(())
    }
}

// =================================================================================================
// Run
// =================================================================================================

/// Every sequence of a trap-memory run, sampled on the same time grid
#[derive(Debug, Clone, PartialEq)]
pub struct TrapMemoryRun {
    /// Time grid (s)
    pub time: Vec<f64>,

    /// log10 of the carrier density
    pub log_density: Vec<f64>,

    /// Carrier density (cm⁻³)
    pub density: Vec<f64>,

    /// Trap occupancy in [0, 1]
    pub occupancy: Vec<f64>,

    /// Recombination proxy `A·n·f`
    pub recombination: Vec<f64>,

    /// First index of the falling leg
    pub split_index: usize,

    /// Euler step factors of the grid
    pub stability: StabilityReport,

    /// A-posteriori step diagnostics
    pub diagnostics: StepDiagnostics,

    /// Name of the solver that produced `occupancy`
    pub solver_name: String,
}

impl TrapMemoryRun {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false for a completed run
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Occupancy at the end of the sweep
    pub fn final_occupancy(&self) -> Option<f64> {
        self.occupancy.last().copied()
    }

    /// Recombination proxy against log10 n, split into rising and falling legs
    pub fn hysteresis(&self) -> Result<HysteresisLoop, SimulationError> {
        HysteresisLoop::from_sweep(&self.log_density, &self.recombination, self.split_index)
    }
}

// =================================================================================================
// Experiment
// =================================================================================================

/// Runs the trap-memory experiment
#[derive(Debug, Clone, Copy, Default)]
pub struct TrapMemoryExperiment;

impl TrapMemoryExperiment {
    /// Build the sweep, integrate the occupancy and derive the proxy
    ///
    /// Two runs with the same configuration are bit-identical.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfiguration`] for invalid parameters,
    /// solver errors otherwise.
    pub fn run(config: &TrapMemoryConfig) -> Result<TrapMemoryRun, SimulationError> {
        config.validate()?;

        let sweep = Arc::new(DensitySweep::up_down(
            config.t_end,
            config.samples,
            config.logn_low,
            config.logn_high,
        )?);
        let model = TrapOccupancy::new(
            config.capture_coefficient,
            config.emission_rate,
            config.initial_occupancy,
            Arc::clone(&sweep),
        )?;
        let proxy = RecombinationProxy::new(config.recombination_scale)?;

        let stability = model.stability();
        if !stability.is_monotone() {
            log::warn!(
                "step factor reaches {:.3} at step {:?} ({} oscillatory, {} divergent steps); \
                 clamping keeps the occupancy in [0, 1] but the trace is not a relaxation",
                stability.max_step_factor,
                stability.worst_step,
                stability.oscillatory_steps,
                stability.divergent_steps
            );
        }

        let solver = config.integrator.solver();
        let scenario = Scenario::from_model(Box::new(model.clone()));
        let solver_config = SolverConfiguration::time_evolution(config.t_end, sweep.len() - 1);

        let result = solver.solve(&scenario, &solver_config)?;
        let occupancy = result.scalar_series(PhysicalQuantity::TrapOccupancy)?;

        let diagnostics = model.diagnostics(&occupancy, result.bound_corrections)?;
        let recombination = proxy.evaluate(sweep.density(), &occupancy)?;

        log::info!(
            "trap memory: {} samples over {} s with {}, final occupancy {:.4}, {} clamped steps",
            sweep.len(),
            config.t_end,
            solver.name(),
            occupancy.last().copied().unwrap_or(config.initial_occupancy),
            diagnostics.clamped_steps
        );

        Ok(TrapMemoryRun {
            time: sweep.time().to_vec(),
            log_density: sweep.log_density().to_vec(),
            density: sweep.density().to_vec(),
            occupancy,
            recombination,
            split_index: sweep.split_index(),
            stability,
            diagnostics,
            solver_name: solver.name().to_string(),
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

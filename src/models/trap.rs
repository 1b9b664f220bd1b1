//! Trap-occupancy balance driven by a carrier-density sweep
//!
//! # Mathematical Background
//!
//! A population of trap states exchanges carriers with the free-carrier
//! reservoir. With `f` the occupied fraction:
//!
//! ```text
//! df/dt = kc · n(t) · (1 − f) − ke · f
//! ```
//!
//! - **kc** : capture coefficient (cm³/s), capture ∝ density × empty traps
//! - **ke** : emission rate (1/s), release ∝ occupied traps
//! - **n(t)** : carrier density from a [`DensitySweep`]
//!
//! At constant `n` the balance relaxes exponentially towards
//! `f* = kc·n / (kc·n + ke)` with rate `kc·n + ke`. When `n` sweeps faster
//! than that rate, `f` lags behind and the same density maps to different
//! occupancies on the way up and on the way down: the trap "memory".
//!
//! # Explicit stepping
//!
//! For forward Euler the error on this linear balance is multiplied by
//! `1 − λ` per step, with the step factor `λ = dt·(kc·n + ke)`:
//!
//! | λ            | behaviour                              |
//! |--------------|----------------------------------------|
//! | `λ ≤ 1`      | monotone relaxation                    |
//! | `1 < λ ≤ 2`  | oscillating, bounded                   |
//! | `λ > 2`      | divergent, only clamping keeps f in [0, 1] |
//!
//! [`StabilityReport`] evaluates `λ` on every step before integration.

use std::sync::Arc;

use crate::error::SimulationError;
use crate::models::DensitySweep;
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

// =================================================================================================
// Trap Occupancy Model
// =================================================================================================

/// Capture/emission balance of a trap population
///
/// The solver publishes the current time through the state metadata; the
/// model reads the carrier density at that time from its sweep.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use trapmem_rs::models::{DensitySweep, TrapOccupancy};
/// use trapmem_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration};
///
/// let sweep = Arc::new(DensitySweep::up_down(20.0, 4000, 14.0, 17.0).unwrap());
/// let model = TrapOccupancy::new(5e-18, 0.4, 0.05, Arc::clone(&sweep)).unwrap();
///
/// let config = SolverConfiguration::time_evolution(sweep.duration(), sweep.len() - 1);
/// let result = EulerSolver::new()
///     .solve(&Scenario::from_model(Box::new(model)), &config)
///     .unwrap();
///
/// assert_eq!(result.len(), 4000);
/// ```
#[derive(Debug, Clone)]
pub struct TrapOccupancy {
    capture_coefficient: f64,
    emission_rate: f64,
    initial_occupancy: f64,
    sweep: Arc<DensitySweep>,
}

impl TrapOccupancy {
    /// Create the model
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfiguration`] when `kc` or `ke` is
    /// negative or not finite, or when `f0` lies outside `[0, 1]`.
    pub fn new(
        capture_coefficient: f64,
        emission_rate: f64,
        initial_occupancy: f64,
        sweep: Arc<DensitySweep>,
    ) -> Result<Self, SimulationError> {
        if !capture_coefficient.is_finite() || capture_coefficient < 0.0 {
            return Err(SimulationError::invalid(format!(
                "capture coefficient must be finite and non-negative, got {}",
                capture_coefficient
            )));
        }
        if !emission_rate.is_finite() || emission_rate < 0.0 {
            return Err(SimulationError::invalid(format!(
                "emission rate must be finite and non-negative, got {}",
                emission_rate
            )));
        }
        if !(0.0..=1.0).contains(&initial_occupancy) {
            return Err(SimulationError::invalid(format!(
                "initial occupancy must lie in [0, 1], got {}",
                initial_occupancy
            )));
        }

        Ok(Self {
            capture_coefficient,
            emission_rate,
            initial_occupancy,
            sweep,
        })
    }

    /// Capture coefficient `kc` (cm³/s)
    pub fn capture_coefficient(&self) -> f64 {
        self.capture_coefficient
    }

    /// Emission rate `ke` (1/s)
    pub fn emission_rate(&self) -> f64 {
        self.emission_rate
    }

    /// Initial occupancy `f0`
    pub fn initial_occupancy(&self) -> f64 {
        self.initial_occupancy
    }

    /// Density sweep driving the model
    pub fn sweep(&self) -> &DensitySweep {
        &self.sweep
    }

    /// Right-hand side `kc·n·(1 − f) − ke·f`
    #[inline]
    pub fn rate(&self, occupancy: f64, density: f64) -> f64 {
        self.capture_coefficient * density * (1.0 - occupancy) - self.emission_rate * occupancy
    }

    /// Equilibrium occupancy at a constant density
    ///
    /// Returns 0.0 when both rates vanish.
    pub fn steady_state(&self, density: f64) -> f64 {
        let capture = self.capture_coefficient * density;
        let total = capture + self.emission_rate;
        if total > 0.0 { capture / total } else { 0.0 }
    }

    /// Exact occupancy after `t` seconds at a constant density, starting at `f0`
    pub fn relaxation(&self, density: f64, t: f64) -> f64 {
        let f_star = self.steady_state(density);
        let rate = self.capture_coefficient * density + self.emission_rate;
        f_star + (self.initial_occupancy - f_star) * (-rate * t).exp()
    }

    /// Euler step factors `λ_i = dt·(kc·n_i + ke)` on the sweep grid
    pub fn stability(&self) -> StabilityReport {
        let dt = self.sweep.dt();
        let steps = self.sweep.len().saturating_sub(1);
        let factors = self.sweep.density()[..steps]
            .iter()
            .map(|n| dt * (self.capture_coefficient * n + self.emission_rate));

        StabilityReport::from_step_factors(factors)
    }

    /// Largest explicit increment `|dt·df/dt|` along an occupancy trace
    ///
    /// `occupancy` must be sampled on the sweep grid.
    pub fn diagnostics(&self, occupancy: &[f64], clamped_steps: usize) -> Result<StepDiagnostics, SimulationError> {
        if occupancy.len() != self.sweep.len() {
            return Err(SimulationError::LengthMismatch {
                expected: self.sweep.len(),
                found: occupancy.len(),
            });
        }

        let dt = self.sweep.dt();
        let max_increment = occupancy
            .iter()
            .zip(self.sweep.density())
            .take(occupancy.len().saturating_sub(1))
            .map(|(f, n)| (dt * self.rate(*f, *n)).abs())
            .fold(0.0, f64::max);

        Ok(StepDiagnostics {
            max_increment,
            clamped_steps,
        })
    }
}

impl PhysicalModel for TrapOccupancy {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        match state.scalar(PhysicalQuantity::TrapOccupancy) {
            Some(f) => {
                let n = self.sweep.density_at(state.time());
                PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(self.rate(f, n)))
            }
            None => PhysicalState::empty(),
        }
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::TrapOccupancy,
            PhysicalData::from_scalar(self.initial_occupancy),
        )
    }

    fn enforce_bounds(&self, state: &mut PhysicalState) -> bool {
        let Some(f) = state.scalar(PhysicalQuantity::TrapOccupancy) else {
            return false;
        };

        let clamped = f.clamp(0.0, 1.0);
        if clamped == f {
            return false;
        }

        state.set(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(clamped));
        true
    }

    fn name(&self) -> &str {
        "Trap Occupancy"
    }

    fn description(&self) -> Option<&str> {
        Some("df/dt = kc·n(t)·(1 − f) − ke·f, f clamped to [0, 1]")
    }
}

// =================================================================================================
// Stability Report
// =================================================================================================

/// Regime of an explicit step on the linear trap balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRegime {
    /// `λ ≤ 1`
    Monotone,
    /// `1 < λ ≤ 2`
    Oscillatory,
    /// `λ > 2`
    Divergent,
}

impl StepRegime {
    /// Classify a step factor
    pub fn classify(step_factor: f64) -> Self {
        if step_factor <= 1.0 {
            StepRegime::Monotone
        } else if step_factor <= 2.0 {
            StepRegime::Oscillatory
        } else {
            StepRegime::Divergent
        }
    }
}

/// Summary of the Euler step factors over a run
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityReport {
    /// Largest `λ` over all steps (0.0 without steps)
    pub max_step_factor: f64,

    /// Step where the largest `λ` occurs
    pub worst_step: Option<usize>,

    /// Number of steps with `1 < λ ≤ 2`
    pub oscillatory_steps: usize,

    /// Number of steps with `λ > 2`
    pub divergent_steps: usize,

    /// Number of steps examined
    pub steps: usize,
}

impl StabilityReport {
    /// Build the report from per-step factors
    pub fn from_step_factors(factors: impl IntoIterator<Item = f64>) -> Self {
        let mut report = Self {
            max_step_factor: 0.0,
            worst_step: None,
            oscillatory_steps: 0,
            divergent_steps: 0,
            steps: 0,
        };

        for (step, factor) in factors.into_iter().enumerate() {
            report.steps += 1;

            if report.worst_step.is_none() || factor > report.max_step_factor {
                report.max_step_factor = factor;
                report.worst_step = Some(step);
            }

            match StepRegime::classify(factor) {
                StepRegime::Monotone => {}
                StepRegime::Oscillatory => report.oscillatory_steps += 1,
                StepRegime::Divergent => report.divergent_steps += 1,
            }
        }

        report
    }

    /// Regime of the worst step
    pub fn regime(&self) -> StepRegime {
        StepRegime::classify(self.max_step_factor)
    }

    /// No step diverges (`λ ≤ 2` everywhere)
    pub fn is_stable(&self) -> bool {
        self.divergent_steps == 0
    }

    /// Every step relaxes monotonically (`λ ≤ 1` everywhere)
    pub fn is_monotone(&self) -> bool {
        self.divergent_steps == 0 && self.oscillatory_steps == 0
    }
}

// =================================================================================================
// Step Diagnostics
// =================================================================================================

/// A-posteriori diagnostics of an occupancy trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDiagnostics {
    /// Largest `|dt·df/dt|` before clamping
    pub max_increment: f64,

    /// Steps where clamping changed the value
    pub clamped_steps: usize,
}

// =================================================================================================
// Tests
// =================================================================================================

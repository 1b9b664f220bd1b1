//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! ```text
//! dy/dt = f(y, t)
//! y_{n+1} = y_n + dt * f(y_n, t_n)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (error ~ O(dt))
//! - **Stability**: Conditionally stable. For a linear relaxation
//!   `dy/dt = -λ y` the step factor `λ·dt` must stay below 1 for a
//!   monotone trajectory and below 2 for a bounded one.
//! - **Complexity**: 1 function evaluation per step
//!
//! Forward Euler is the reference integrator of the trap-memory experiment:
//! its trajectory is reproducible bit for bit from the update formula.

use crate::error::SimulationError;
use crate::physics::PhysicalState;
use crate::solver::{
    time_evolution_parameters, validate_state, Scenario, SimulationResult, Solver, SolverConfiguration,
};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler time-stepping solver
///
/// # Algorithm
///
/// 1. Start with the initial state `y_0`, stamped with `t = 0`
/// 2. For each step `n = 0, .., N-1`:
///    - Compute physics `k = f(y_n, t_n)`
///    - Update `y_{n+1} = y_n + dt * k`, stamped with `t_{n+1} = (n+1)·dt`
///    - Let the model project `y_{n+1}` back into its domain
///    - Reject NaN / Inf
/// 3. Return the complete trajectory (`N + 1` states)
///
/// With `N = 0` the trajectory holds the initial state only and `dt = 0`.
///
/// # Example
///
/// ```rust
/// use trapmem_rs::solver::{EulerSolver, Solver};
///
/// let solver = EulerSolver::new();
/// assert_eq!(solver.name(), "Forward Euler");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Forward Euler solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {

    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, SimulationError> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (total_time, time_steps) = time_evolution_parameters(self.name(), config)?;

        // ====== Step 2: Setup ======

        let dt = if time_steps == 0 { 0.0 } else { total_time / time_steps as f64 };

        let mut state = scenario
            .conditions
            .initial_condition()
            .cloned()
            .ok_or(SimulationError::MissingInitialCondition)?;
        state.set_time(0.0);

        log::debug!(
            "{}: integrating '{}' over {} s in {} steps (dt = {:e})",
            self.name(),
            scenario.get_model_name(),
            total_time,
            time_steps,
            dt
        );

        let mut time_points = Vec::with_capacity(time_steps + 1);
        let mut state_trajectory = Vec::with_capacity(time_steps + 1);
        let mut bound_corrections = 0usize;

        time_points.push(0.0);
        state_trajectory.push(state.clone());

        // ====== Step 3: Time Integration ======

        for step in 0..time_steps {
            let physics: PhysicalState = scenario.model.compute_physics(&state);

            state = state.clone() + physics * dt;

            // t_{n+1} computed from the index, never accumulated
            let t_next = (step as f64 + 1.0) * dt;
            state.set_time(t_next);

            if scenario.model.enforce_bounds(&mut state) {
                bound_corrections += 1;
            }

            validate_state(&state, step + 1)?;

            state_trajectory.push(state.clone());
            time_points.push(t_next);
        }

        if bound_corrections > 0 {
            log::debug!(
                "{}: model '{}' corrected {} of {} steps",
                self.name(),
                scenario.get_model_name(),
                bound_corrections,
                time_steps
            );
        }

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(time_points, state_trajectory, state);
        result.bound_corrections = bound_corrections;

        result.add_metadata("solver", self.name());
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("bound corrections", &bound_corrections.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity};
    use crate::solver::{DomainBoundaries, SolverType};

    /// dy/dt = -k * y, y(0) = 1
    struct ExponentialDecay {
        decay_rate: f64,
    }

    impl PhysicalModel for ExponentialDecay {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
            let y = state.scalar(PhysicalQuantity::TrapOccupancy).unwrap_or(0.0);
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(-self.decay_rate * y))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(1.0))
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// dy/dt = t, so y(t) = t²/2 when integrated exactly
    struct Ramp;

    impl PhysicalModel for Ramp {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(state.time()))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(0.0))
        }

        fn name(&self) -> &str {
            "Ramp"
        }
    }

    /// dy/dt = 1 with y clamped to [0, 1]
    struct SaturatingGrowth;

    impl PhysicalModel for SaturatingGrowth {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, _state: &PhysicalState) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(1.0))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(0.0))
        }

        fn enforce_bounds(&self, state: &mut PhysicalState) -> bool {
            let y = state.scalar(PhysicalQuantity::TrapOccupancy).unwrap_or(0.0);
            let clamped = y.clamp(0.0, 1.0);
            state.set(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(clamped));
            clamped != y
        }

        fn name(&self) -> &str {
            "Saturating Growth"
        }
    }

    /// dy/dt = 1 / (1 - y), which blows up once y reaches 1
    struct Singular;

    impl PhysicalModel for Singular {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
            let y = state.scalar(PhysicalQuantity::TrapOccupancy).unwrap_or(0.0);
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(1.0 / (1.0 - y)))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(0.5))
        }

        fn name(&self) -> &str {
            "Singular"
        }
    }

    fn occupancy(result: &SimulationResult) -> Vec<f64> {
        result.scalar_series(PhysicalQuantity::TrapOccupancy).unwrap()
    }

    #[test]
    fn test_euler_solver_name() {
        assert_eq!(EulerSolver::default().name(), "Forward Euler");
    }

    #[test]
    fn test_trajectory_length_and_time_grid() {
        let scenario = Scenario::from_model(Box::new(ExponentialDecay { decay_rate: 0.5 }));
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(10.0, 100))
            .unwrap();

        assert_eq!(result.len(), 101);
        assert_eq!(result.state_trajectory.len(), 101);
        assert_eq!(result.time_points[0], 0.0);
        assert!((result.time_points[100] - 10.0).abs() < 1e-12);
        assert_eq!(result.state_trajectory[37].time(), result.time_points[37]);
    }

    #[test]
    fn test_single_step_matches_update_formula() {
        let scenario = Scenario::from_model(Box::new(ExponentialDecay { decay_rate: 0.4 }));
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(0.25, 1))
            .unwrap();

        assert_eq!(occupancy(&result)[1], 1.0 + (-0.4 * 1.0) * 0.25);
    }

    #[test]
    fn test_decay_is_close_to_analytical() {
        let scenario = Scenario::from_model(Box::new(ExponentialDecay { decay_rate: 1.0 }));
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(1.0, 10_000))
            .unwrap();

        let y_final = result.final_state.scalar(PhysicalQuantity::TrapOccupancy).unwrap();
        assert!((y_final - (-1.0f64).exp()).abs() < 1e-4);
    }

    #[test]
    fn test_time_reaches_the_model() {
        let scenario = Scenario::from_model(Box::new(Ramp));
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(1.0, 4))
            .unwrap();

        // Left Riemann sum of t over [0, 1] with 4 intervals
        let y_final = result.final_state.scalar(PhysicalQuantity::TrapOccupancy).unwrap();
        assert!((y_final - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_are_enforced_and_counted() {
        let scenario = Scenario::from_model(Box::new(SaturatingGrowth));
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(4.0, 8))
            .unwrap();

        assert!(occupancy(&result).iter().all(|y| (0.0..=1.0).contains(y)));
        assert_eq!(occupancy(&result)[8], 1.0);
        // y reaches exactly 1.0 at step 2 and is clamped from step 3 onwards
        assert_eq!(result.bound_corrections, 6);
        assert_eq!(result.metadata.get("bound corrections").map(String::as_str), Some("6"));
    }

    #[test]
    fn test_zero_steps_returns_initial_state() {
        let scenario = Scenario::from_model(Box::new(ExponentialDecay { decay_rate: 1.0 }));
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(5.0, 0))
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.time_points, vec![0.0]);
        assert_eq!(result.final_state.scalar(PhysicalQuantity::TrapOccupancy), Some(1.0));
        assert_eq!(result.metadata.get("dt").map(String::as_str), Some("0"));
    }

    #[test]
    fn test_non_finite_state_is_reported() {
        // dt = 0.25 lands exactly on y = 1 after the first step
        let scenario = Scenario::from_model(Box::new(Singular));
        let err = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(0.5, 2))
            .unwrap_err();

        assert!(matches!(err, SimulationError::NonFinite { step: 2, .. }));
    }

    #[test]
    fn test_custom_configuration_is_rejected() {
        let scenario = Scenario::from_model(Box::new(Ramp));
        let config = SolverConfiguration::new(SolverType::Custom("Adaptive".into(), Default::default()));

        let err = EulerSolver::new().solve(&scenario, &config).unwrap_err();
        assert!(matches!(err, SimulationError::UnsupportedConfiguration { solver: "Forward Euler", .. }));
    }

    #[test]
    fn test_missing_initial_condition() {
        let scenario = Scenario::new(Box::new(Ramp), DomainBoundaries::default());
        let result = EulerSolver::new().solve(&scenario, &SolverConfiguration::time_evolution(1.0, 1));
        assert!(result.is_err());
    }
}

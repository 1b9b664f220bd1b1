//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! ```text
//! k₁ = f(yₙ, tₙ)
//! k₂ = f(yₙ + dt/2 * k₁, tₙ + dt/2)
//! k₃ = f(yₙ + dt/2 * k₂, tₙ + dt/2)
//! k₄ = f(yₙ + dt * k₃, tₙ + dt)
//!
//! yₙ₊₁ = yₙ + dt/6 * (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(dt⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Stability**: stable for `λ·dt` up to about 2.78 on a linear relaxation
//!
//! | Method | Order | Evals/Step | Error |
//! |--------|-------|------------|-------|
//! | Euler  | 1     | 1          | O(dt) |
//! | RK4    | 4     | 4          | O(dt⁴)|
//!
//! Intermediate stages are stamped with their own time (`tₙ + dt/2`,
//! `tₙ + dt`), so time-driven models see the forcing at the stage instant.
//! Bounds are enforced on completed steps only.

use crate::error::SimulationError;
use crate::solver::{
    time_evolution_parameters, validate_state, Scenario, SimulationResult, Solver, SolverConfiguration,
};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// # Example
///
/// ```rust
/// use trapmem_rs::solver::{RK4Solver, Solver};
///
/// let solver = RK4Solver::new();
/// assert_eq!(solver.name(), "Runge-Kutta 4");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, SimulationError> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (total_time, time_steps) = time_evolution_parameters(self.name(), config)?;

        // ====== Step 2: Setup ======

        let dt = if time_steps == 0 { 0.0 } else { total_time / time_steps as f64 };
        let half_dt = dt / 2.0;

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
            let t = step as f64 * dt;
            let model = &scenario.model;

            // ====== RK4 Stages ======

            let k1 = model.compute_physics(&state);

            let mut state_k2 = state.clone() + k1.clone() * half_dt;
            state_k2.set_time(t + half_dt);
            let k2 = model.compute_physics(&state_k2);

            let mut state_k3 = state.clone() + k2.clone() * half_dt;
            state_k3.set_time(t + half_dt);
            let k3 = model.compute_physics(&state_k3);

            let mut state_k4 = state.clone() + k3.clone() * dt;
            state_k4.set_time(t + dt);
            let k4 = model.compute_physics(&state_k4);

            // ====== RK4 Update ======

            let weighted_slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
            state = state.clone() + weighted_slope * (dt / 6.0);

            let t_next = (step as f64 + 1.0) * dt;
            state.set_time(t_next);

            if model.enforce_bounds(&mut state) {
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
        result.add_metadata("function evaluations", &(4 * time_steps).to_string());
        result.add_metadata("bound corrections", &bound_corrections.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! Photon-pumped exciton population
//!
//! # Mathematical Background
//!
//! An infrared photon flux pumps an intermediate (exciton) level whose
//! population `X` decays radiatively, by cooperative quenching and by energy
//! transfer to the ground-level population `X0`:
//!
//! ```text
//! dX/dt = P − X/τ1 − k_coop·X² − k_ET·X·X0
//! P     = σ · N0 · Φ · exp(−α·z)
//! ```
//!
//! - **σ** : absorption cross-section (cm²)
//! - **N0** : absorber density (cm⁻³)
//! - **Φ** : photon flux (photons/cm²/s)
//! - **α, z** : absorption coefficient and depth of the probed slice
//!
//! The steady state is the positive root of
//! `k_coop·X² + (1/τ1 + k_ET·X0)·X − P = 0`.
//!
//! With the reference constants the linear loss rate is about 1e7 s⁻¹, so an
//! explicit integrator needs `dt` well below 1e-7 s over a 5 ms window.

use crate::error::SimulationError;
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
use crate::solver::{RK4Solver, Scenario, SimulationResult, Solver, SolverConfiguration};

/// Exciton rate equation under constant photon pumping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotonPumpedExciton {
    /// Absorption cross-section σ (cm²)
    pub cross_section: f64,
    /// Absorber density N0 (cm⁻³)
    pub absorber_density: f64,
    /// Photon flux Φ (photons/cm²/s)
    pub photon_flux: f64,
    /// Absorption coefficient α
    pub absorption_coefficient: f64,
    /// Depth z (cm)
    pub depth: f64,
    /// Exciton lifetime τ1 (s)
    pub lifetime: f64,
    /// Cooperative quenching constant k_coop
    pub cooperative_quenching: f64,
    /// Energy-transfer rate k_ET
    pub energy_transfer: f64,
    /// Ground-level population X0
    pub ground_population: f64,
}

impl Default for PhotonPumpedExciton {
    fn default() -> Self {
        Self {
            cross_section: 1e-16,
            absorber_density: 1e17,
            photon_flux: 1e20,
            absorption_coefficient: 2.0,
            depth: 0.05,
            lifetime: 1e-3,
            cooperative_quenching: 5e-10,
            energy_transfer: 1e-8,
            ground_population: 1e15,
        }
    }
}

impl PhotonPumpedExciton {
    /// Check that all constants are finite and the loss terms non-negative
    pub fn validate(&self) -> Result<(), SimulationError> {
        let all = [
            self.cross_section,
            self.absorber_density,
            self.photon_flux,
            self.absorption_coefficient,
            self.depth,
            self.lifetime,
            self.cooperative_quenching,
            self.energy_transfer,
            self.ground_population,
        ];
        if all.iter().any(|x| !x.is_finite()) {
            return Err(SimulationError::invalid("exciton parameters must be finite"));
        }
        if self.lifetime <= 0.0 {
            return Err(SimulationError::invalid(format!("lifetime must be positive, got {}", self.lifetime)));
        }
        if self.cooperative_quenching < 0.0 || self.energy_transfer < 0.0 || self.ground_population < 0.0 {
            return Err(SimulationError::invalid("loss coefficients must be non-negative"));
        }
        Ok(())
    }

    /// Pump rate `P = σ·N0·Φ·exp(−α·z)`
    pub fn pump_rate(&self) -> f64 {
        self.cross_section * self.absorber_density * self.photon_flux * (-self.absorption_coefficient * self.depth).exp()
    }

    /// First-order loss rate `1/τ1 + k_ET·X0`
    pub fn linear_loss(&self) -> f64 {
        1.0 / self.lifetime + self.energy_transfer * self.ground_population
    }

    /// Right-hand side `dX/dt` at population `x`
    pub fn rate(&self, population: f64) -> f64 {
        self.pump_rate()
            - population / self.lifetime
            - self.cooperative_quenching * population * population
            - self.energy_transfer * population * self.ground_population
    }

    /// Positive root of the steady-state quadratic
    ///
    /// ```rust
    /// use trapmem_rs::models::PhotonPumpedExciton;
    ///
    /// let model = PhotonPumpedExciton::default();
    /// let x = model.steady_state();
    /// assert!(model.rate(x).abs() / model.pump_rate() < 1e-9);
    /// ```
    pub fn steady_state(&self) -> f64 {
        let a = self.cooperative_quenching;
        let b = self.linear_loss();
        let p = self.pump_rate();

        // 2P / (b + sqrt(b² + 4aP)) avoids the cancellation of (−b + sqrt(..)) / 2a
        2.0 * p / (b + (b * b + 4.0 * a * p).sqrt())
    }

    /// Integrate `X(t)` from `X(0) = 0` over `span` seconds with RK4
    pub fn integrate(&self, span: f64, steps: usize) -> Result<SimulationResult, SimulationError> {
        self.validate()?;

        let scenario = Scenario::from_model(Box::new(*self));
        let config = SolverConfiguration::time_evolution(span, steps);
        RK4Solver::new().solve(&scenario, &config)
    }
}

impl PhysicalModel for PhotonPumpedExciton {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        match state.scalar(PhysicalQuantity::ExcitonPopulation) {
            Some(x) => PhysicalState::new(
                PhysicalQuantity::ExcitonPopulation,
                PhysicalData::from_scalar(self.rate(x)),
            ),
            None => PhysicalState::empty(),
        }
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::ExcitonPopulation, PhysicalData::from_scalar(0.0))
    }

    fn enforce_bounds(&self, state: &mut PhysicalState) -> bool {
        match state.scalar(PhysicalQuantity::ExcitonPopulation) {
            Some(x) if x < 0.0 => {
                state.set(PhysicalQuantity::ExcitonPopulation, PhysicalData::from_scalar(0.0));
                true
            }
            _ => false,
        }
    }

    fn name(&self) -> &str {
        "Photon-Pumped Exciton"
    }

    fn description(&self) -> Option<&str> {
        Some("dX/dt = P − X/τ1 − k_coop·X² − k_ET·X·X0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_rate() {
        let model = PhotonPumpedExciton::default();
        let expected = 1e21 * (-0.1f64).exp();
        assert!((model.pump_rate() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_steady_state_without_quenching_is_linear() {
        let model = PhotonPumpedExciton {
            cooperative_quenching: 0.0,
            ..Default::default()
        };
        let expected = model.pump_rate() / model.linear_loss();
        assert!((model.steady_state() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_rk4_approaches_steady_state() {
        let model = PhotonPumpedExciton::default();
        let result = model.integrate(5e-3, 50_000).unwrap();

        let series = result.scalar_series(PhysicalQuantity::ExcitonPopulation).unwrap();
        let x_final = series[series.len() - 1];
        let x_star = model.steady_state();

        assert_eq!(series[0], 0.0);
        assert!((x_final - x_star).abs() / x_star < 1e-6);
        assert!(series.iter().all(|x| *x >= 0.0 && *x <= x_star * (1.0 + 1e-9)));
        assert_eq!(result.bound_corrections, 0);
    }

    #[test]
    fn test_negative_population_is_clamped() {
        let model = PhotonPumpedExciton::default();
        let mut state = PhysicalState::new(PhysicalQuantity::ExcitonPopulation, PhysicalData::from_scalar(-5.0));

        assert!(model.enforce_bounds(&mut state));
        assert_eq!(state.scalar(PhysicalQuantity::ExcitonPopulation), Some(0.0));
    }

    #[test]
    fn test_invalid_parameters() {
        let model = PhotonPumpedExciton { lifetime: 0.0, ..Default::default() };
        assert!(model.integrate(1e-3, 10).is_err());

        let model = PhotonPumpedExciton { energy_transfer: -1.0, ..Default::default() };
        assert!(model.validate().is_err());
    }
}
